use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Markdown rendering error: {message}")]
    #[diagnostic(
        code(tgp_content::markdown::render),
        help("The markdown document could not be rendered to HTML.")
    )]
    Markdown { message: String },
}
