use crate::core::template::{Segment, Template};
use crate::domain::ports::FragmentLookup;
use crate::utils::error::MissingFragmentError;

/// 將模板中的每個引入標記替換為對應片段的原始內容。
///
/// 標記依文件順序解析；片段內容原樣輸出，不做跳脫，也不再展開其中的標記。
/// 任何一個片段不存在時回傳 [`MissingFragmentError`]，不會產生部分輸出。
pub fn compose<L>(template: &Template, fragments: &L) -> Result<Vec<u8>, MissingFragmentError>
where
    L: FragmentLookup + ?Sized,
{
    let mut resolved = Vec::with_capacity(template.segments().len());
    let mut total = 0;

    for segment in template.segments() {
        let bytes = match segment {
            Segment::Literal(bytes) => bytes.as_slice(),
            Segment::Include(name) => fragments
                .lookup(name)
                .ok_or_else(|| MissingFragmentError::new(name.as_str()))?
                .content(),
        };
        total += bytes.len();
        resolved.push(bytes);
    }

    let mut output = Vec::with_capacity(total);
    for bytes in resolved {
        output.extend_from_slice(bytes);
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::fragment_store::FragmentSet;

    fn fragments(pairs: &[(&str, &str)]) -> FragmentSet {
        pairs.iter().map(|(name, content)| (*name, *content)).collect()
    }

    #[test]
    fn test_compose_replaces_markers_in_order() {
        let template = Template::parse("<html><!--menu--><!--body--></html>");
        let set = fragments(&[("menu", "<nav/>"), ("body", "<p>hi</p>")]);

        let output = compose(&template, &set).unwrap();
        assert_eq!(output, b"<html><nav/><p>hi</p></html>".to_vec());
    }

    #[test]
    fn test_compose_reports_missing_fragment() {
        let template = Template::parse("<html><!--header--><!--footer--></html>");
        let set = fragments(&[("header", "<h1/>")]);

        let err = compose(&template, &set).unwrap_err();
        assert_eq!(err, MissingFragmentError::new("footer"));
    }

    #[test]
    fn test_compose_reports_first_missing_fragment() {
        let template = Template::parse("<!--a--><!--b-->");
        let err = compose(&template, &FragmentSet::new()).unwrap_err();
        assert_eq!(err.name, "a");
    }

    #[test]
    fn test_compose_without_markers_is_identity() {
        let template = Template::parse("<p>static</p>");
        let output = compose(&template, &FragmentSet::new()).unwrap();
        assert_eq!(output, b"<p>static</p>".to_vec());
    }

    #[test]
    fn test_compose_repeats_fragment_for_repeated_marker() {
        let template = Template::parse("<!--hr-->x<!--hr-->");
        let set = fragments(&[("hr", "<hr>")]);
        assert_eq!(compose(&template, &set).unwrap(), b"<hr>x<hr>".to_vec());
    }
}
