use serde::{Deserialize, Serialize};
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Style {
    #[default]
    Narrow,
    Wide,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Charset {
    #[default]
    Ascii,
    Unicode,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    Tree,
    Json,
}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArboOptions {
    pub separator: char,
    pub zero_terminated: bool,
    pub strip_leading: bool,
    pub sort: bool,
    pub decorate: bool,
    pub batch_size: usize,
    pub style: Style,
    pub charset: Charset,
    pub format: OutputFormat,
    pub pretty: bool,
}
impl Default for ArboOptions {
    fn default() -> Self {
        Self {
            separator: '/',
            zero_terminated: false,
            strip_leading: false,
            sort: false,
            decorate: false,
            batch_size: 256,
            style: Style::Narrow,
            charset: Charset::Ascii,
            format: OutputFormat::Tree,
            pretty: false,
        }
    }
}
#[derive(Debug, Default)]
pub struct ArboBuilder {
    options: ArboOptions,
}
impl ArboBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn separator(mut self, separator: char) -> Self {
        self.options.separator = separator;
        self
    }
    pub fn zero_terminated(mut self, yes: bool) -> Self {
        self.options.zero_terminated = yes;
        self
    }
    pub fn strip_leading(mut self, yes: bool) -> Self {
        self.options.strip_leading = yes;
        self
    }
    pub fn sort(mut self, yes: bool) -> Self {
        self.options.sort = yes;
        self
    }
    pub fn decorate(mut self, yes: bool) -> Self {
        self.options.decorate = yes;
        self
    }
    pub fn batch_size(mut self, size: usize) -> Self {
        self.options.batch_size = size.max(1);
        self
    }
    pub fn style(mut self, style: Style) -> Self {
        self.options.style = style;
        self
    }
    pub fn charset(mut self, charset: Charset) -> Self {
        self.options.charset = charset;
        self
    }
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.options.format = format;
        self
    }
    pub fn pretty(mut self, yes: bool) -> Self {
        self.options.pretty = yes;
        self
    }
    pub fn build(self) -> ArboOptions {
        self.options
    }
}
