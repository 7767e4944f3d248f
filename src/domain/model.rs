use crate::core::template::Template;
use std::sync::Arc;

/// 具名、不可變的標記片段。內容在載入後共享，不會再被修改。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    name: String,
    content: Arc<[u8]>,
}

impl Fragment {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        let content: Vec<u8> = content.into();
        Self {
            name: name.into(),
            content: Arc::from(content),
        }
    }

    /// 以另一個名稱共享同一份內容
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: Arc::clone(&self.content),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// 綁定到路由的一頁：已解析的模板加上回應的 Content-Type
#[derive(Debug, Clone)]
pub struct Page {
    pub route: String,
    pub template: Template,
    pub content_type: String,
}

impl Page {
    pub const DEFAULT_CONTENT_TYPE: &'static str = "text/html; charset=utf-8";

    pub fn new(route: impl Into<String>, template: Template) -> Self {
        Self {
            route: route.into(),
            template,
            content_type: Self::DEFAULT_CONTENT_TYPE.to_string(),
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }
}
