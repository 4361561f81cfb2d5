use std::str::Split;

/// Logical content lines of an iCalendar text, with RFC 5545 folding undone.
///
/// A physical line starting with a space or tab continues the previous one;
/// that single leading character is dropped. Calling [`unfold`] again on the
/// same text yields the same lines.
pub fn unfold(text: &str) -> Unfold<'_> {
    Unfold {
        lines: text.split('\n'),
        pending: None,
    }
}

#[derive(Debug, Clone)]
pub struct Unfold<'a> {
    lines: Split<'a, char>,
    pending: Option<String>,
}

impl Iterator for Unfold<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        for raw in self.lines.by_ref() {
            let line = raw.strip_suffix('\r').unwrap_or(raw);

            if let Some(rest) = line.strip_prefix([' ', '\t']) {
                self.pending.get_or_insert_with(String::new).push_str(rest);
                continue;
            }

            if let Some(done) = self.pending.replace(line.to_string()) {
                if !done.is_empty() {
                    return Some(done);
                }
            }
        }

        self.pending.take().filter(|line| !line.is_empty())
    }
}
