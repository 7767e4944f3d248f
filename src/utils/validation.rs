use crate::utils::error::{Result, SiteError};
use std::collections::HashSet;
use std::net::SocketAddr;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// 路由必須是以 `/` 開頭的絕對路徑，不含查詢字串或片段
pub fn validate_route(field_name: &str, route: &str) -> Result<()> {
    let reason = if !route.starts_with('/') {
        Some("Route must start with '/'")
    } else if route.contains(['?', '#']) {
        Some("Route cannot contain a query string or fragment")
    } else if route.contains('%') {
        Some("Route must be written decoded, without percent-escapes")
    } else if route.chars().any(char::is_whitespace) {
        Some("Route cannot contain whitespace")
    } else if route.split('/').any(|segment| segment == "..") {
        Some("Route cannot contain '..' segments")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: route.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

pub fn validate_unique_routes<'a, I>(field_name: &str, routes: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for route in routes {
        if !seen.insert(route) {
            return Err(SiteError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: route.to_string(),
                reason: "Route is declared more than once".to_string(),
            });
        }
    }
    Ok(())
}

pub fn validate_socket_addr(field_name: &str, addr: &str) -> Result<SocketAddr> {
    addr.parse::<SocketAddr>()
        .map_err(|e| SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: addr.to_string(),
            reason: format!("Invalid socket address: {}", e),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("site.fragment_dir", "fragments").is_ok());
        assert!(validate_path("site.fragment_dir", "").is_err());
        assert!(validate_path("site.fragment_dir", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_route() {
        assert!(validate_route("pages.route", "/").is_ok());
        assert!(validate_route("pages.route", "/revvis.php").is_ok());
        assert!(validate_route("pages.route", "/software/").is_ok());
        assert!(validate_route("pages.route", "revvis.php").is_err());
        assert!(validate_route("pages.route", "/a?b=1").is_err());
        assert!(validate_route("pages.route", "/a b").is_err());
        assert!(validate_route("pages.route", "/../etc").is_err());
        assert!(validate_route("pages.route", "/über.php").is_ok());
        assert!(validate_route("pages.route", "/%C3%BCber.php").is_err());
    }

    #[test]
    fn test_validate_unique_routes() {
        assert!(validate_unique_routes("pages", ["/a", "/b"]).is_ok());
        assert!(validate_unique_routes("pages", ["/a", "/b", "/a"]).is_err());
    }

    #[test]
    fn test_validate_socket_addr() {
        let addr = validate_socket_addr("server.bind_address", "127.0.0.1:8080").unwrap();
        assert_eq!(addr.port(), 8080);
        assert!(validate_socket_addr("server.bind_address", "localhost").is_err());
    }
}
