//! Result rendering.

use crate::error::ExecutorError;
use crate::operator::Operator;

/// Drain `root` and render one line per result tuple, fields
/// comma-and-space separated, with no trailing newline.
///
/// The whole stream is rendered before the caller writes anything, so a
/// mid-stream failure produces an error and no partial output.
pub fn dump(root: &mut dyn Operator) -> Result<String, ExecutorError> {
    let mut rendered = String::new();
    let mut first = true;
    while let Some(tuple) = root.next_tuple()? {
        if first {
            first = false;
        } else {
            rendered.push('\n');
        }
        rendered.push_str(&tuple.to_string());
    }
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::testing::{int, Rows};

    #[test]
    fn lines_without_trailing_newline() {
        let mut rows = Rows::new(&["x", "y"], vec![vec![int(1), int(2)], vec![int(3), int(4)]]);
        assert_eq!(dump(&mut rows).unwrap(), "1, 2\n3, 4");
    }

    #[test]
    fn empty_stream_renders_empty() {
        let mut rows = Rows::new(&["x"], vec![]);
        assert_eq!(dump(&mut rows).unwrap(), "");
    }

    #[test]
    fn single_tuple_has_no_newline() {
        let mut rows = Rows::new(&["x"], vec![vec![int(7)]]);
        assert_eq!(dump(&mut rows).unwrap(), "7");
    }
}
