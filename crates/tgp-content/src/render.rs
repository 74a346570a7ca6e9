use crate::error::Error;

/// Renders GitHub flavoured markdown to HTML. Raw HTML in the source is
/// passed through; the converter drops whatever it cannot publish.
pub fn markdown_to_html(markdown_input: &str) -> Result<String, Error> {
    let options = ::markdown::Options {
        compile: ::markdown::CompileOptions {
            allow_dangerous_html: true,
            ..::markdown::CompileOptions::gfm()
        },
        ..::markdown::Options::gfm()
    };

    ::markdown::to_html_with_options(markdown_input, &options).map_err(|e| Error::Markdown {
        message: e.to_string(),
    })
}
