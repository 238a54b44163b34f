use crate::error::{missing_parameter, FigmaError};

/// Resource families exposed by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    File,
    Comments,
    Images,
    Me,
    TeamProjects,
    ProjectFiles,
}

impl Endpoint {
    /// Path template relative to the versioned base URL
    ///
    /// `{name}` marks a placeholder; values are substituted in the order the
    /// placeholders appear.
    pub fn template(self) -> &'static str {
        match self {
            Endpoint::File => "files/{key}",
            Endpoint::Comments => "files/{key}/comments",
            Endpoint::Images => "images/{key}",
            Endpoint::Me => "me",
            Endpoint::TeamProjects => "teams/{id}/projects",
            Endpoint::ProjectFiles => "projects/{id}/files",
        }
    }
}

/// A piece of a path template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    Placeholder(&'a str),
}

/// Splits a template into literal text and `{name}` placeholders
///
/// An opening brace without a matching closing brace is kept as literal text.
pub fn parse_template(template: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let Some(len) = rest[open + 1..].find('}') else {
            break;
        };
        if open > 0 {
            segments.push(Segment::Literal(&rest[..open]));
        }
        segments.push(Segment::Placeholder(&rest[open + 1..open + 1 + len]));
        rest = &rest[open + 2 + len..];
    }
    if !rest.is_empty() {
        segments.push(Segment::Literal(rest));
    }
    segments
}

/// Substitutes path parameters into a template
///
/// Each value is percent-encoded as a single path segment. Values beyond
/// the number of placeholders are ignored.
///
/// # Errors
/// Returns [`FigmaError::MissingParameter`] naming the first placeholder
/// whose value is absent or blank.
pub fn render_path(template: &str, path_params: &[&str]) -> Result<String, FigmaError> {
    let mut path = String::with_capacity(template.len());
    let mut values = path_params.iter();
    for segment in parse_template(template) {
        match segment {
            Segment::Literal(text) => path.push_str(text),
            Segment::Placeholder(name) => {
                let value = values
                    .next()
                    .map(|v| v.trim())
                    .filter(|v| !v.is_empty())
                    .ok_or_else(|| missing_parameter(name))?;
                path.push_str(&urlencoding::encode(value));
            }
        }
    }
    Ok(path)
}
