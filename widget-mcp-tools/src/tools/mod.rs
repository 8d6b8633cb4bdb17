pub mod base;
pub mod list_widget_directory;
pub mod read_documentation;
pub mod read_widget_file;
pub mod read_widget_templates;
pub mod write_widget_file;

pub use base::Tool;
pub use list_widget_directory::ListWidgetDirectoryTool;
pub use read_documentation::{DocTopic, ReadDocumentationTool};
pub use read_widget_file::ReadWidgetFileTool;
pub use read_widget_templates::{ReadWidgetTemplatesTool, TemplateKind};
pub use write_widget_file::WriteWidgetFileTool;

use crate::storage::Encoding;

pub(crate) fn encoding_values() -> Vec<&'static str> {
    Encoding::ALL.iter().map(Encoding::as_str).collect()
}
