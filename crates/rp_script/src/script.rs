//! Splitting scripts into segments.
//!
//! ```text
//! script      := segment ("." segment)*
//! segment     := call | field
//! field       := identifier
//! call        := identifier "(" [placeholder ("," placeholder)*] ")"
//! placeholder := "%" positive-integer
//! ```

use alloc::boxed::Box;
use alloc::string::ToString;
use alloc::vec::Vec;
use core::fmt;

use crate::bind::Placeholder;
use crate::error::InvalidScriptReason;

// -----------------------------------------------------------------------------
// Segment

/// One `.`-delimited unit of a script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A field read, e.g. `name`.
    Field { name: &'a str },
    /// A method call, e.g. `rename(%1)` or `len()`.
    Call {
        name: &'a str,
        params: Vec<Placeholder>,
    },
}

impl<'a> Segment<'a> {
    /// Classifies and parses the text of a single segment.
    ///
    /// A segment is a call iff it contains `(` and ends with `)`.
    /// Everything else is a field, whose name may not contain `.`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rp_script::script::Segment;
    ///
    /// let call = Segment::parse("swap(%2, %1)").unwrap();
    /// assert!(call.is_call());
    /// assert_eq!(call.to_string(), "swap(%2,%1)");
    ///
    /// assert!(Segment::parse("a.b").is_err());
    /// ```
    pub fn parse(text: &'a str) -> Result<Self, InvalidScriptReason> {
        if text.is_empty() {
            return Err(InvalidScriptReason::EmptySegment { offset: 0 });
        }

        let Some(open) = text.find('(').filter(|_| text.ends_with(')')) else {
            if text.contains('.') {
                return Err(InvalidScriptReason::DottedFieldName {
                    name: text.to_string(),
                });
            }
            return Ok(Segment::Field { name: text });
        };

        let name = &text[..open];
        if name.is_empty() {
            return Err(InvalidScriptReason::EmptySegment { offset: 0 });
        }

        // The closing `)` always exists, `text` ends with one.
        let inner = &text[open + 1..];
        let body = match inner.find(')') {
            Some(close) => &inner[..close],
            None => inner,
        };

        let params = if body.trim().is_empty() {
            Vec::new()
        } else {
            body.split(',')
                .map(Placeholder::parse)
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(Segment::Call { name, params })
    }

    /// The field or method name.
    #[inline]
    pub fn name(&self) -> &'a str {
        match self {
            Segment::Field { name } | Segment::Call { name, .. } => name,
        }
    }

    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, Segment::Call { .. })
    }
}

impl fmt::Display for Segment<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Field { name } => f.write_str(name),
            Segment::Call { name, params } => {
                write!(f, "{name}(")?;
                for (index, param) in params.iter().enumerate() {
                    if index > 0 {
                        f.write_str(",")?;
                    }
                    fmt::Display::fmt(param, f)?;
                }
                f.write_str(")")
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Tokenizer

/// Splits `script` at its first top-level `.`.
///
/// Dots inside a call's parentheses do not count.
fn split_top_level(script: &str) -> (&str, Option<&str>) {
    let mut depth = 0_usize;
    for (index, byte) in script.bytes().enumerate() {
        match byte {
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            b'.' if depth == 0 => return (&script[..index], Some(&script[index + 1..])),
            _ => {}
        }
    }
    (script, None)
}

/// Peels the next segment off `script`.
///
/// One leading `.` is stripped first. Returns the segment and the remaining
/// script, or `None` if the segment was the last one.
///
/// # Examples
///
/// ```
/// use rp_script::script::{Segment, next_segment};
///
/// let (segment, rest) = next_segment(".owner.rename(%1).name").unwrap();
/// assert_eq!(segment, Segment::Field { name: "owner" });
/// assert_eq!(rest, Some("rename(%1).name"));
///
/// let (segment, rest) = next_segment("name").unwrap();
/// assert_eq!(segment.name(), "name");
/// assert_eq!(rest, None);
/// ```
pub fn next_segment(script: &str) -> Result<(Segment<'_>, Option<&str>), InvalidScriptReason> {
    let script = script.strip_prefix('.').unwrap_or(script);
    let (text, rest) = split_top_level(script);
    Ok((Segment::parse(text)?, rest))
}

// -----------------------------------------------------------------------------
// CompiledScript

/// A [`Segment`] with its byte offset in the source script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetSegment<'a> {
    pub offset: usize,
    pub segment: Segment<'a>,
}

/// A script parsed once into its segments.
///
/// Parsing validates the whole script up front, so a malformed tail fails
/// before any member is read or called. The same compiled script can be
/// evaluated any number of times.
///
/// # Examples
///
/// ```
/// use rp_script::script::CompiledScript;
///
/// let script = CompiledScript::parse("owner.rename(%1, %2).len()").unwrap();
/// assert_eq!(script.len(), 3);
/// assert_eq!(script.source(), "owner.rename(%1, %2).len()");
/// assert_eq!(script.to_string(), "owner.rename(%1,%2).len()");
///
/// assert!(CompiledScript::parse("owner..").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledScript<'a> {
    source: &'a str,
    segments: Box<[OffsetSegment<'a>]>,
}

impl<'a> CompiledScript<'a> {
    /// Parses `source` into segments.
    pub fn parse(source: &'a str) -> Result<Self, InvalidScriptReason> {
        let mut segments = Vec::new();
        let mut rest = source;
        let mut offset = 0;

        loop {
            let stripped = rest.strip_prefix('.').unwrap_or(rest);
            offset += rest.len() - stripped.len();

            let (text, tail) = split_top_level(stripped);
            let segment = Segment::parse(text).map_err(|reason| match reason {
                InvalidScriptReason::EmptySegment { .. } => {
                    InvalidScriptReason::EmptySegment { offset }
                }
                other => other,
            })?;
            segments.push(OffsetSegment { offset, segment });

            match tail {
                Some(tail) => {
                    offset += stripped.len() - tail.len();
                    rest = tail;
                }
                None => break,
            }
        }

        Ok(Self {
            source,
            segments: segments.into_boxed_slice(),
        })
    }

    /// The text this script was parsed from.
    #[inline]
    pub fn source(&self) -> &'a str {
        self.source
    }

    #[inline]
    pub fn segments(&self) -> &[OffsetSegment<'a>] {
        &self.segments
    }

    /// Returns the number of segments, never zero.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }
}

impl fmt::Display for CompiledScript<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, item) in self.segments.iter().enumerate() {
            if index > 0 {
                f.write_str(".")?;
            }
            fmt::Display::fmt(&item.segment, f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{CompiledScript, Segment, next_segment, split_top_level};
    use crate::bind::Placeholder;
    use crate::error::InvalidScriptReason;

    fn placeholders(numbers: &[usize]) -> Vec<Placeholder> {
        numbers
            .iter()
            .map(|&n| Placeholder::new(n).unwrap())
            .collect()
    }

    #[test]
    fn classify_segments() {
        assert_eq!(Segment::parse("count"), Ok(Segment::Field { name: "count" }));
        assert_eq!(
            Segment::parse("len()"),
            Ok(Segment::Call {
                name: "len",
                params: Vec::new()
            })
        );
        assert_eq!(
            Segment::parse("put(%1,%2)"),
            Ok(Segment::Call {
                name: "put",
                params: placeholders(&[1, 2]),
            })
        );
        // Not closed by `)`: looked up as a (missing) field.
        assert_eq!(Segment::parse("len("), Ok(Segment::Field { name: "len(" }));
    }

    #[test]
    fn blank_parameter_list_has_no_arguments() {
        let segment = Segment::parse("len(  )").unwrap();
        assert_eq!(
            segment,
            Segment::Call {
                name: "len",
                params: Vec::new()
            }
        );
    }

    #[test]
    fn placeholders_keep_script_order() {
        let Segment::Call { params, .. } = Segment::parse("swap(%2, %1)").unwrap() else {
            panic!("expected a call");
        };
        assert_eq!(params, placeholders(&[2, 1]));
    }

    #[test]
    fn dotted_field_name_is_rejected() {
        assert_eq!(
            Segment::parse("a.b"),
            Err(InvalidScriptReason::DottedFieldName {
                name: "a.b".to_string()
            })
        );
    }

    #[test]
    fn malformed_placeholders() {
        for text in ["m(1)", "m(%)", "m(%0)", "m(%x)", "m(%1,)", "m(%+1)"] {
            assert!(
                matches!(
                    Segment::parse(text),
                    Err(InvalidScriptReason::MalformedPlaceholder { .. })
                ),
                "{text}"
            );
        }
    }

    #[test]
    fn top_level_split_ignores_dots_in_calls() {
        assert_eq!(split_top_level("m(%1.x).y"), ("m(%1.x)", Some("y")));
        assert!(matches!(
            next_segment("m(%1.x).y"),
            Err(InvalidScriptReason::MalformedPlaceholder { .. })
        ));
    }

    #[test]
    fn leading_dot_is_stripped_once() {
        let script = CompiledScript::parse(".a..b").unwrap();
        let names: Vec<_> = script.segments().iter().map(|s| s.segment.name()).collect();
        assert_eq!(names, vec!["a", "b"]);

        assert_eq!(
            CompiledScript::parse("a...b"),
            Err(InvalidScriptReason::EmptySegment { offset: 3 })
        );
    }

    #[test]
    fn empty_segments_report_offsets() {
        assert_eq!(
            CompiledScript::parse(""),
            Err(InvalidScriptReason::EmptySegment { offset: 0 })
        );
        assert_eq!(
            CompiledScript::parse("owner."),
            Err(InvalidScriptReason::EmptySegment { offset: 6 })
        );
    }

    #[test]
    fn segment_offsets() {
        let script = CompiledScript::parse("owner.rename(%1).name").unwrap();
        let offsets: Vec<_> = script.segments().iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0, 6, 17]);
    }
}
