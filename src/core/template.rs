use crate::utils::error::Result;
use regex::bytes::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// 兩種引入標記：`<!--name-->` 以及 PHP 的 `<?php include "name"; ?>`。
/// 一般 HTML 註解（含空白或其他標記）視為純文字。
static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?x)
        <!--(?P<comment>[A-Za-z0-9](?:[A-Za-z0-9_./-]*[A-Za-z0-9_./])?)-->
        |
        <\?php\s+(?:include|require)(?:_once)?\s*\(?\s*["'](?P<php>[^"'\s]+)["']\s*\)?\s*;?\s*\?>
        "#,
    )
    .expect("marker pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(Vec<u8>),
    Include(String),
}

/// 解析後的頁面模板：依文件順序排列的字面內容與引入標記
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: impl AsRef<[u8]>) -> Self {
        let source = source.as_ref();
        let mut segments = Vec::new();
        let mut last = 0;

        for caps in MARKER.captures_iter(source) {
            let Some(whole) = caps.get(0) else { continue };
            let Some(name) = caps.name("comment").or_else(|| caps.name("php")) else {
                continue;
            };

            if whole.start() > last {
                segments.push(Segment::Literal(source[last..whole.start()].to_vec()));
            }
            segments.push(Segment::Include(
                String::from_utf8_lossy(name.as_bytes()).into_owned(),
            ));
            last = whole.end();
        }

        if last < source.len() {
            segments.push(Segment::Literal(source[last..].to_vec()));
        }

        Self { segments }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let source = std::fs::read(path)?;
        Ok(Self::parse(source))
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Fragment names in document order, duplicates included.
    pub fn includes(&self) -> impl Iterator<Item = &str> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Include(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    pub fn literal_len(&self) -> usize {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(bytes) => bytes.len(),
                Segment::Include(_) => 0,
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(s: &str) -> Segment {
        Segment::Literal(s.as_bytes().to_vec())
    }

    fn inc(s: &str) -> Segment {
        Segment::Include(s.to_string())
    }

    #[test]
    fn test_parse_comment_markers() {
        let template = Template::parse("<html><!--menu--><!--body--></html>");
        assert_eq!(
            template.segments(),
            &[lit("<html>"), inc("menu"), inc("body"), lit("</html>")]
        );
    }

    #[test]
    fn test_parse_without_markers() {
        let template = Template::parse("<p>plain</p>");
        assert_eq!(template.segments(), &[lit("<p>plain</p>")]);
        assert_eq!(template.includes().count(), 0);

        assert!(Template::parse("").segments().is_empty());
    }

    #[test]
    fn test_ordinary_comments_stay_literal() {
        let source = "<!-- rechte spalte --><!--<img src=\"a.jpg\">--><!------>";
        let template = Template::parse(source);
        assert_eq!(template.segments(), &[lit(source)]);
    }

    #[test]
    fn test_parse_php_include_variants() {
        let source = concat!(
            r#"<?php include "inc/meta.inc.php"; ?>"#,
            r#"<?php include "inc/menu_software.inc.php";?>"#,
            r#"<?php require_once('inc/footer.inc.php') ?>"#,
            r#"<?php echo "not an include"; ?>"#,
        );
        let template = Template::parse(source);
        let names: Vec<&str> = template.includes().collect();
        assert_eq!(
            names,
            vec![
                "inc/meta.inc.php",
                "inc/menu_software.inc.php",
                "inc/footer.inc.php"
            ]
        );
        assert_eq!(
            template.segments().last(),
            Some(&lit(r#"<?php echo "not an include"; ?>"#))
        );
    }

    #[test]
    fn test_marker_names_keep_paths_and_dots() {
        let template = Template::parse("<!--inc/header.inc--><!--side_menu-2-->");
        let names: Vec<&str> = template.includes().collect();
        assert_eq!(names, vec!["inc/header.inc", "side_menu-2"]);
    }

    #[test]
    fn test_literal_len() {
        let template = Template::parse("ab<!--x-->cd");
        assert_eq!(template.literal_len(), 4);
    }
}
