//! Path templates such as `/users/:id/cats/:cat`.
//!
//! A template is compiled once, then used both to match incoming paths and to
//! render outgoing ones. Parameter values are never percent-encoded or
//! decoded: a rendered value is copied into the path as is, so callers must
//! pass path-safe values (no `/`, `?` or `#`) for a render to match back.

use std::fmt::Display;

use crate::{error::TemplateError, Error, Params, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
}

#[derive(Debug, Clone)]
pub struct PathTemplate {
    pattern: String,
    segments: Box<[Segment]>,
}

impl PathTemplate {
    pub fn compile<S: AsRef<str>>(pattern: S) -> Result<Self> {
        let pattern = pattern.as_ref();
        let invalid = |reason| Error::invalid_template(pattern, reason);
        let rest = pattern
            .strip_prefix('/')
            .ok_or_else(|| invalid(TemplateError::MissingLeadingSlash))?;
        let mut segments: Vec<Segment> = Vec::new();
        for part in split_segments(rest) {
            if part.is_empty() {
                return Err(invalid(TemplateError::EmptySegment));
            }
            let segment = match part.strip_prefix(':') {
                Some("") => return Err(invalid(TemplateError::EmptyParamName)),
                Some(name) => {
                    if segments
                        .iter()
                        .any(|segment| matches!(segment, Segment::Param(other) if other == name))
                    {
                        return Err(invalid(TemplateError::DuplicateParam(name.to_string())));
                    }
                    Segment::Param(name.to_string())
                }
                None => Segment::Literal(part.to_string()),
            };
            segments.push(segment);
        }
        Ok(Self {
            pattern: pattern.to_string(),
            segments: segments.into_boxed_slice(),
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Matches a concrete path, returning the captured parameters.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let rest = path.strip_prefix('/')?;
        let mut params = Params::new();
        let mut parts = split_segments(rest);
        for segment in self.segments.iter() {
            let part = parts.next()?;
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Param(name) if !part.is_empty() => params.insert(name.as_str(), part),
                _ => return None,
            }
        }
        if parts.next().is_some() {
            return None;
        }
        Some(params)
    }

    /// Substitutes `params` into the template. Values are inserted verbatim.
    pub fn render(&self, params: &Params) -> Result<String> {
        if self.segments.is_empty() {
            return Ok("/".to_string());
        }
        let mut path = String::with_capacity(self.pattern.len());
        for segment in self.segments.iter() {
            path.push('/');
            match segment {
                Segment::Literal(literal) => path.push_str(literal),
                Segment::Param(name) => path.push_str(
                    params
                        .get(name)
                        .ok_or_else(|| Error::missing_param(&self.pattern, name))?,
                ),
            }
        }
        Ok(path)
    }

    /// Two templates have the same shape when they match exactly the same paths,
    /// which is the case when only their parameter names differ.
    pub fn same_shape(&self, other: &PathTemplate) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(other.segments.iter())
                .all(|pair| match pair {
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    (Segment::Param(_), Segment::Param(_)) => true,
                    _ => false,
                })
    }
}

impl Display for PathTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.pattern.fmt(f)
    }
}

/// The root path has no segments at all.
fn split_segments(rest: &str) -> impl Iterator<Item = &str> {
    rest.split('/').skip(usize::from(rest.is_empty()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn matches(pattern: &str, path: &str) -> Option<Params> {
        PathTemplate::compile(pattern).unwrap().matches(path)
    }

    fn reason(pattern: &str) -> TemplateError {
        match PathTemplate::compile(pattern) {
            Err(Error::InvalidTemplate { reason, .. }) => reason,
            other => panic!("expected invalid template, got {other:?}"),
        }
    }

    #[test]
    fn should_compile_segments() {
        let template = PathTemplate::compile("/users/:id/cats/:cat").unwrap();
        assert_eq!(
            template.segments(),
            &[
                Segment::Literal("users".to_string()),
                Segment::Param("id".to_string()),
                Segment::Literal("cats".to_string()),
                Segment::Param("cat".to_string()),
            ]
        );
        assert_eq!(template.param_names().collect::<Vec<_>>(), vec!["id", "cat"]);
        assert_eq!(template.pattern(), "/users/:id/cats/:cat");
    }

    #[test]
    fn should_reject_invalid_templates() {
        assert_eq!(reason("/a//b"), TemplateError::EmptySegment);
        assert_eq!(reason("/a/"), TemplateError::EmptySegment);
        assert_eq!(reason("//"), TemplateError::EmptySegment);
        assert_eq!(reason("/a/:"), TemplateError::EmptyParamName);
        assert_eq!(reason("users/:id"), TemplateError::MissingLeadingSlash);
        assert_eq!(reason(""), TemplateError::MissingLeadingSlash);
        assert_eq!(
            reason("/users/:id/cats/:id"),
            TemplateError::DuplicateParam("id".to_string())
        );
    }

    #[test]
    fn should_match_paths() {
        assert_eq!(matches("/", "/hello/world"), None);
        assert_eq!(matches("/", "/"), Some(Params::new()));
        assert_eq!(
            matches("/hello/:name", "/hello/world"),
            Some(Params::from([("name", "world")]))
        );
        assert_eq!(matches("/hello/:name", "/hello"), None);
        assert_eq!(matches("/hello/:name", "/hello/"), None);
        assert_eq!(matches("/hello/:name", "/hello/world/me"), None);
        assert_eq!(
            matches("/hello/:name/me", "/hello/world/me"),
            Some(Params::from([("name", "world")]))
        );
        assert_eq!(matches("/hello/:name", "hello/world"), None);
    }

    #[test]
    fn should_not_match_on_segment_count_mismatch() {
        assert_eq!(matches("/a/:id", "/a/1/2"), None);
        assert_eq!(matches("/a/:id", "/a"), None);
    }

    #[test]
    fn should_compare_literals_case_sensitively() {
        assert_eq!(matches("/users/:id", "/Users/1"), None);
        assert!(matches("/users/:id", "/users/1").is_some());
    }

    #[test]
    fn should_capture_raw_segments() {
        assert_eq!(
            matches("/files/:name", "/files/a%20b"),
            Some(Params::from([("name", "a%20b")]))
        );
    }

    #[test]
    fn should_render_paths() {
        let template = PathTemplate::compile("/users/:id/cats/:cat").unwrap();
        let params = Params::from([("cat", "2"), ("id", "1"), ("dog", "3")]);
        assert_eq!(template.render(&params).unwrap(), "/users/1/cats/2");
        assert_eq!(
            PathTemplate::compile("/").unwrap().render(&Params::new()).unwrap(),
            "/"
        );
    }

    #[test]
    fn should_fail_to_render_missing_param() {
        let template = PathTemplate::compile("/users/:id/cats/:cat").unwrap();
        let result = template.render(&Params::from([("id", "1")]));
        assert!(matches!(
            result,
            Err(Error::MissingParam { ref name, .. }) if name == "cat"
        ));
    }

    #[test]
    fn should_match_what_it_renders() {
        for (pattern, params) in [
            ("/users/:id", Params::from([("id", "42")])),
            ("/users/:id/dogs/:dog", Params::from([("dog", "rex"), ("id", "me")])),
            ("/:a/b/:c", Params::from([("a", "x.y"), ("c", "%2F")])),
        ] {
            let template = PathTemplate::compile(pattern).unwrap();
            let path = template.render(&params).unwrap();
            assert_eq!(template.matches(&path), Some(params));
        }
    }

    #[test]
    fn should_not_encode_rendered_values() {
        let template = PathTemplate::compile("/files/:name").unwrap();
        let path = template.render(&Params::from([("name", "a/b")])).unwrap();
        assert_eq!(path, "/files/a/b");
        assert_eq!(template.matches(&path), None);
    }

    #[test]
    fn should_compare_shapes_ignoring_param_names() {
        let a = PathTemplate::compile("/users/:id").unwrap();
        assert!(a.same_shape(&PathTemplate::compile("/users/:uid").unwrap()));
        assert!(!a.same_shape(&PathTemplate::compile("/users/me").unwrap()));
        assert!(!a.same_shape(&PathTemplate::compile("/users/:id/cats").unwrap()));
    }
}
