/// One step of a field path: a mapping key or a sequence index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Key(String),
    Index(usize),
}

/// A parsed field path into an event, e.g. `a.b[0].c`, `[id]`, `[a][b]`.
///
/// Parsed once at configuration time; lookups walk the typed segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    segments: Vec<Segment>,
}

impl Path {
    /// Parse a dot/bracket path. Bracket groups holding only digits become
    /// sequence indices, everything else becomes a mapping key.
    pub fn parse(input: &str) -> Self {
        let mut segments = Vec::new();
        let mut buf = String::new();
        let mut chars = input.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '.' => {
                    if !buf.is_empty() {
                        segments.push(Segment::Key(std::mem::take(&mut buf)));
                    }
                }
                '[' => {
                    if !buf.is_empty() {
                        segments.push(Segment::Key(std::mem::take(&mut buf)));
                    }
                    let mut inner = String::new();
                    while let Some(&next) = chars.peek() {
                        chars.next();
                        if next == ']' {
                            break;
                        }
                        inner.push(next);
                    }
                    if !inner.is_empty() {
                        let is_index = inner.chars().all(|c| c.is_ascii_digit());
                        match inner.parse::<usize>() {
                            Ok(i) if is_index => segments.push(Segment::Index(i)),
                            _ => segments.push(Segment::Key(inner)),
                        }
                    }
                }
                _ => buf.push(c),
            }
        }
        if !buf.is_empty() {
            segments.push(Segment::Key(buf));
        }

        Path { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
