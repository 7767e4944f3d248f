use crate::adapters::fragment_store::{FragmentSet, LocalFragmentStore};
use crate::config::SiteConfig;
use crate::core::compose::compose;
use crate::core::template::Template;
use crate::domain::model::Page;
use crate::domain::ports::FragmentLookup;
use crate::utils::error::{Result, SiteError};
use std::collections::BTreeMap;

/// A marker that names a fragment the lookup cannot resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedFragment {
    pub route: String,
    pub name: String,
}

/// 依路由組合頁面。片段與模板在建立時載入，之後只讀。
#[derive(Debug)]
pub struct PageComposer<L> {
    fragments: L,
    pages: BTreeMap<String, Page>,
    index: Option<String>,
}

impl<L: FragmentLookup> PageComposer<L> {
    pub fn new(fragments: L) -> Self {
        Self {
            fragments,
            pages: BTreeMap::new(),
            index: None,
        }
    }

    pub fn add_page(&mut self, page: Page) -> Result<()> {
        if self.pages.contains_key(&page.route) {
            return Err(SiteError::InvalidConfigValueError {
                field: "pages.route".to_string(),
                value: page.route,
                reason: "Route is declared more than once".to_string(),
            });
        }
        self.pages.insert(page.route.clone(), page);
        Ok(())
    }

    /// 設定 `/` 所顯示的頁面（路由必須已註冊）
    pub fn set_index(&mut self, route: &str) -> Result<()> {
        if !self.pages.contains_key(route) {
            return Err(SiteError::UnknownPage {
                route: route.to_string(),
            });
        }
        self.index = Some(route.to_string());
        Ok(())
    }

    pub fn fragments(&self) -> &L {
        &self.fragments
    }

    pub fn routes(&self) -> impl Iterator<Item = &str> + '_ {
        self.pages.keys().map(String::as_str)
    }

    pub fn page(&self, route: &str) -> Result<&Page> {
        if let Some(page) = self.pages.get(route) {
            return Ok(page);
        }
        let aliased = match (&self.index, route) {
            (Some(index), "/") => self.pages.get(index),
            _ => None,
        };
        aliased.ok_or_else(|| SiteError::UnknownPage {
            route: route.to_string(),
        })
    }

    pub fn render(&self, route: &str) -> Result<Vec<u8>> {
        let page = self.page(route)?;
        let output = compose(&page.template, &self.fragments)?;
        tracing::debug!(
            "Composed {} ({} bytes) for route {}",
            page.route,
            output.len(),
            route
        );
        Ok(output)
    }

    /// Every marker across all pages whose fragment is missing, in route then document order.
    pub fn check(&self) -> Vec<UnresolvedFragment> {
        let mut unresolved = Vec::new();
        for page in self.pages.values() {
            for name in page.template.includes() {
                let already_reported = unresolved
                    .iter()
                    .any(|u: &UnresolvedFragment| u.route == page.route && u.name == name);
                if self.fragments.lookup(name).is_none() && !already_reported {
                    unresolved.push(UnresolvedFragment {
                        route: page.route.clone(),
                        name: name.to_string(),
                    });
                }
            }
        }
        unresolved
    }
}

impl PageComposer<FragmentSet> {
    /// 依站台設定載入片段目錄與所有頁面模板
    pub fn from_site_config(config: &SiteConfig) -> Result<Self> {
        let fragments = LocalFragmentStore::new(config.fragment_dir()).load()?;
        let mut composer = PageComposer::new(fragments);

        for page_config in &config.pages {
            let path = config.template_path(page_config);
            let template = Template::from_file(&path).map_err(|e| SiteError::ConfigError {
                message: format!("Failed to load template {}: {}", path.display(), e),
            })?;

            let mut page = Page::new(page_config.route.as_str(), template);
            if let Some(content_type) = &page_config.content_type {
                page = page.with_content_type(content_type.as_str());
            }
            tracing::debug!(
                "Registered page {} ({} markers) from {}",
                page.route,
                page.template.includes().count(),
                path.display()
            );
            composer.add_page(page)?;
        }

        if let Some(index) = &config.site.index {
            composer.set_index(index)?;
        }

        tracing::info!(
            "🧩 Site '{}' ready with {} pages",
            config.site.name,
            composer.pages.len()
        );
        Ok(composer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn composer() -> PageComposer<FragmentSet> {
        let fragments: FragmentSet = [("menu", "<nav/>"), ("body", "<p>hi</p>")]
            .into_iter()
            .collect();
        let mut composer = PageComposer::new(fragments);
        composer
            .add_page(Page::new(
                "/index.html",
                Template::parse("<html><!--menu--><!--body--></html>"),
            ))
            .unwrap();
        composer
            .add_page(Page::new(
                "/broken.html",
                Template::parse("<!--menu--><!--footer--><!--footer-->"),
            ))
            .unwrap();
        composer
    }

    #[test]
    fn test_render_known_route() {
        let output = composer().render("/index.html").unwrap();
        assert_eq!(output, b"<html><nav/><p>hi</p></html>".to_vec());
    }

    #[test]
    fn test_render_unknown_route() {
        let err = composer().render("/nope").unwrap_err();
        assert!(matches!(err, SiteError::UnknownPage { route } if route == "/nope"));
    }

    #[test]
    fn test_render_missing_fragment() {
        let err = composer().render("/broken.html").unwrap_err();
        assert!(err.is_missing_fragment());
        assert_eq!(err.to_string(), "Missing fragment: footer");
    }

    #[test]
    fn test_index_alias() {
        let mut composer = composer();
        assert!(composer.render("/").is_err());

        composer.set_index("/index.html").unwrap();
        assert_eq!(
            composer.render("/").unwrap(),
            composer.render("/index.html").unwrap()
        );
        assert!(composer.set_index("/missing").is_err());
    }

    #[test]
    fn test_duplicate_route_rejected() {
        let mut composer = composer();
        let err = composer
            .add_page(Page::new("/index.html", Template::parse("dup")))
            .unwrap_err();
        assert!(matches!(err, SiteError::InvalidConfigValueError { .. }));
    }

    #[test]
    fn test_check_lists_each_unresolved_marker_once() {
        let unresolved = composer().check();
        assert_eq!(
            unresolved,
            vec![UnresolvedFragment {
                route: "/broken.html".to_string(),
                name: "footer".to_string(),
            }]
        );
    }
}
