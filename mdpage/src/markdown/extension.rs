//! Markdown extension trait definition
//!
//! An extension is a named switch over the parser's option set. The built-in ones map
//! one-to-one onto `comrak` extensions.

use comrak::ComrakOptions;

/// Trait for named Markdown parser extensions
///
/// # Examples
///
/// ```ignore
/// struct HeaderIds;
///
/// impl Extension for HeaderIds {
///     fn name(&self) -> &str {
///         "header-ids"
///     }
///
///     fn apply(&self, options: &mut ComrakOptions<'static>) {
///         options.extension.header_ids = Some(String::new());
///     }
/// }
/// ```
pub trait Extension: Send + Sync {
    /// The name this extension is requested by (e.g., "table")
    fn name(&self) -> &str;

    /// Optional description of this extension
    fn description(&self) -> &str {
        ""
    }

    /// Enable the extension on a parser option set
    fn apply(&self, options: &mut ComrakOptions<'static>);
}

/// Extensions shipped with the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinExtension {
    Frontmatter,
    Table,
    Strikethrough,
    Autolink,
    Tasklist,
    Superscript,
    Footnotes,
    DescriptionLists,
}

impl BuiltinExtension {
    pub const ALL: [BuiltinExtension; 8] = [
        BuiltinExtension::Frontmatter,
        BuiltinExtension::Table,
        BuiltinExtension::Strikethrough,
        BuiltinExtension::Autolink,
        BuiltinExtension::Tasklist,
        BuiltinExtension::Superscript,
        BuiltinExtension::Footnotes,
        BuiltinExtension::DescriptionLists,
    ];

    /// Extensions enabled when no list is configured.
    pub const DEFAULTS: [BuiltinExtension; 5] = [
        BuiltinExtension::Frontmatter,
        BuiltinExtension::Table,
        BuiltinExtension::Strikethrough,
        BuiltinExtension::Autolink,
        BuiltinExtension::Tasklist,
    ];
}

impl Extension for BuiltinExtension {
    fn name(&self) -> &str {
        match self {
            BuiltinExtension::Frontmatter => "frontmatter",
            BuiltinExtension::Table => "table",
            BuiltinExtension::Strikethrough => "strikethrough",
            BuiltinExtension::Autolink => "autolink",
            BuiltinExtension::Tasklist => "tasklist",
            BuiltinExtension::Superscript => "superscript",
            BuiltinExtension::Footnotes => "footnotes",
            BuiltinExtension::DescriptionLists => "description-lists",
        }
    }

    fn description(&self) -> &str {
        match self {
            BuiltinExtension::Frontmatter => "Leading `---` YAML metadata block",
            BuiltinExtension::Table => "GFM tables",
            BuiltinExtension::Strikethrough => "~~strikethrough~~ text",
            BuiltinExtension::Autolink => "Bare URLs become links",
            BuiltinExtension::Tasklist => "- [x] task list items",
            BuiltinExtension::Superscript => "^superscript^ text",
            BuiltinExtension::Footnotes => "[^note] footnotes",
            BuiltinExtension::DescriptionLists => "Term / : definition lists",
        }
    }

    fn apply(&self, options: &mut ComrakOptions<'static>) {
        match self {
            BuiltinExtension::Frontmatter => {
                options.extension.front_matter_delimiter = Some("---".to_string())
            }
            BuiltinExtension::Table => options.extension.table = true,
            BuiltinExtension::Strikethrough => options.extension.strikethrough = true,
            BuiltinExtension::Autolink => options.extension.autolink = true,
            BuiltinExtension::Tasklist => options.extension.tasklist = true,
            BuiltinExtension::Superscript => options.extension.superscript = true,
            BuiltinExtension::Footnotes => options.extension.footnotes = true,
            BuiltinExtension::DescriptionLists => options.extension.description_lists = true,
        }
    }
}
