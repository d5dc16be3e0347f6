//! minijinja renderer over the template assets embedded at build time.
//!
//! Assets use `[[ ]]` for variables, `[% %]` for blocks and `[# #]` for
//! comments, so GitHub Actions `${{ }}` expressions and `${VAR}`
//! placeholders pass through untouched.

use include_dir::{Dir, DirEntry, File, include_dir};
use minijinja::syntax::SyntaxConfig;
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use tracing::{debug, instrument};

use tachi_core::{
    application::{
        ApplicationError,
        ports::{RenderContext, TemplateRenderer},
    },
    error::TachiResult,
};

static TEMPLATES: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// Renders the embedded assets by their path under `templates/`, e.g.
/// `workflows/pr-deploy.yaml.j2`.
#[derive(Debug)]
pub struct JinjaRenderer {
    env: Environment<'static>,
}

impl JinjaRenderer {
    pub fn new() -> TachiResult<Self> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.set_syntax(syntax()?);

        let mut files = Vec::new();
        collect_files(&TEMPLATES, &mut files);

        for file in files {
            let name = file.path().to_str().ok_or_else(|| invalid_asset(file, "path is not UTF-8"))?;
            let source = file
                .contents_utf8()
                .ok_or_else(|| invalid_asset(file, "content is not UTF-8"))?;
            env.add_template(name, source)
                .map_err(|e| ApplicationError::RenderingFailed {
                    template: name.to_string(),
                    reason: e.to_string(),
                })?;
        }

        debug!(templates = env.templates().count(), "Loaded embedded templates");
        Ok(Self { env })
    }

    /// Names of every loaded template, sorted.
    pub fn template_names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.env.templates().map(|(name, _)| name).collect();
        names.sort_unstable();
        names
    }
}

impl TemplateRenderer for JinjaRenderer {
    #[instrument(skip(self, context))]
    fn render(&self, template: &str, context: &RenderContext) -> TachiResult<String> {
        let tmpl = self
            .env
            .get_template(template)
            .map_err(|_| ApplicationError::TemplateNotFound {
                name: template.to_string(),
            })?;

        tmpl.render(context.as_value()).map_err(|e| {
            ApplicationError::RenderingFailed {
                template: template.to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}

fn syntax() -> TachiResult<SyntaxConfig> {
    SyntaxConfig::builder()
        .block_delimiters("[%", "%]")
        .variable_delimiters("[[", "]]")
        .comment_delimiters("[#", "#]")
        .build()
        .map_err(|e| {
            ApplicationError::RenderingFailed {
                template: "<syntax>".into(),
                reason: e.to_string(),
            }
            .into()
        })
}

fn collect_files(dir: &'static Dir<'static>, files: &mut Vec<&'static File<'static>>) {
    for entry in dir.entries() {
        match entry {
            DirEntry::File(file) => files.push(file),
            DirEntry::Dir(subdir) => collect_files(subdir, files),
        }
    }
}

fn invalid_asset(file: &File<'_>, reason: &str) -> ApplicationError {
    ApplicationError::RenderingFailed {
        template: file.path().to_string_lossy().into_owned(),
        reason: reason.to_string(),
    }
}
