//! Shell-style variable expansion for environment declarations.
//!
//! # Syntax
//!
//! - `$NAME` - NAME is the longest run of ASCII letters, digits and `_`
//! - `${NAME}` - NAME is everything up to the closing brace
//!
//! Expansion never fails: unknown variables expand to whatever the lookup
//! returns (usually the empty string), `${}` expands to nothing, and a `$`
//! that starts neither form is kept as a literal, as is an unclosed `${`.
//!
//! # Example
//!
//! ```
//! use automat_lib::util::expand::{parse, Segment};
//!
//! let segments = parse("$BUILD_ROOT/out:${PATH}");
//! assert_eq!(segments, vec![
//!     Segment::Variable("BUILD_ROOT".to_string()),
//!     Segment::Literal("/out:".to_string()),
//!     Segment::Variable("PATH".to_string()),
//! ]);
//! ```

/// A segment of parsed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
  /// Literal text (no references)
  Literal(String),

  /// A variable reference to be looked up
  Variable(String),
}

/// Source of variable values during expansion.
pub trait Lookup {
  fn lookup(&self, name: &str) -> String;
}

impl<F: Fn(&str) -> String> Lookup for F {
  fn lookup(&self, name: &str) -> String {
    self(name)
  }
}

fn is_name_char(c: char) -> bool {
  c.is_ascii_alphanumeric() || c == '_'
}

/// Split a string into literal text and variable references.
pub fn parse(input: &str) -> Vec<Segment> {
  let mut segments = Vec::new();
  let mut literal = String::new();
  let mut rest = input;

  while let Some(pos) = rest.find('$') {
    literal.push_str(&rest[..pos]);
    let after = &rest[pos + 1..];

    if let Some(braced) = after.strip_prefix('{') {
      match braced.find('}') {
        Some(end) => {
          let name = &braced[..end];
          if !name.is_empty() {
            if !literal.is_empty() {
              segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Variable(name.to_string()));
          }
          rest = &braced[end + 1..];
        }
        None => {
          // Unclosed brace, keep the remainder verbatim
          literal.push('$');
          literal.push_str(after);
          rest = "";
        }
      }
      continue;
    }

    let name_len = after.find(|c: char| !is_name_char(c)).unwrap_or(after.len());
    if name_len == 0 {
      literal.push('$');
      rest = after;
      continue;
    }

    if !literal.is_empty() {
      segments.push(Segment::Literal(std::mem::take(&mut literal)));
    }
    segments.push(Segment::Variable(after[..name_len].to_string()));
    rest = &after[name_len..];
  }

  literal.push_str(rest);
  if !literal.is_empty() {
    segments.push(Segment::Literal(literal));
  }

  segments
}

/// Substitute variable references in pre-parsed segments.
pub fn substitute_segments(segments: &[Segment], lookup: &impl Lookup) -> String {
  let mut result = String::new();
  for segment in segments {
    match segment {
      Segment::Literal(s) => result.push_str(s),
      Segment::Variable(name) => result.push_str(&lookup.lookup(name)),
    }
  }
  result
}

/// Expand every variable reference in `input`.
pub fn expand(input: &str, lookup: &impl Lookup) -> String {
  substitute_segments(&parse(input), lookup)
}
