//! Edge streams that can be traversed twice
//!
//! The two-pass builder needs to see the same entries twice. A seekable
//! source is rewound to the start of its data; any other source is read once
//! and its entries are replayed from memory.

use std::io::{BufRead, Seek, SeekFrom};

use tracing::debug;

use crate::error::Result;
use crate::text::LineReader;

/// One entry of the input, with 0-based indices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge<T> {
    pub row: usize,
    pub col: usize,
    pub weight: Option<T>,
    /// Source line, for error messages
    pub line: usize,
}

impl<T> Edge<T> {
    pub fn new(row: usize, col: usize, weight: Option<T>, line: usize) -> Self {
        Self {
            row,
            col,
            weight,
            line,
        }
    }
}

/// A source of edges that can be traversed from the start more than once
pub trait EdgeStream<T> {
    /// Visits every edge in input order
    fn pass(&mut self, visit: &mut dyn FnMut(Edge<T>) -> Result<()>) -> Result<()>;
}

/// Turns one body line into an edge
///
/// Implementations hold whatever per-format state the body grammar needs.
/// Comment lines never reach the parser; blank lines are skipped.
pub trait EdgeParser<T> {
    fn parse(&mut self, line: &str, number: usize) -> Result<Edge<T>>;
}

/// Edges already held in memory
#[derive(Debug, Clone)]
pub struct Replay<T> {
    edges: Vec<Edge<T>>,
}

impl<T: Copy> Replay<T> {
    pub fn new(edges: Vec<Edge<T>>) -> Self {
        Self { edges }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl<T: Copy> EdgeStream<T> for Replay<T> {
    fn pass(&mut self, visit: &mut dyn FnMut(Edge<T>) -> Result<()>) -> Result<()> {
        for &edge in &self.edges {
            visit(edge)?;
        }
        Ok(())
    }
}

/// Text body read once; later passes replay the buffered edges
pub struct Buffered<R, P, T> {
    lines: Option<LineReader<R>>,
    parser: P,
    buffer: Replay<T>,
}

impl<R: BufRead, P: EdgeParser<T>, T: Copy> Buffered<R, P, T> {
    /// `lines` must be positioned at the first body line
    pub fn new(lines: LineReader<R>, parser: P) -> Self {
        Self {
            lines: Some(lines),
            parser,
            buffer: Replay::new(Vec::new()),
        }
    }
}

impl<R: BufRead, P: EdgeParser<T>, T: Copy> EdgeStream<T> for Buffered<R, P, T> {
    fn pass(&mut self, visit: &mut dyn FnMut(Edge<T>) -> Result<()>) -> Result<()> {
        let Some(mut lines) = self.lines.take() else {
            return self.buffer.pass(visit);
        };

        while let Some((number, line)) = lines.next_data_line()? {
            let edge = self.parser.parse(line, number)?;
            self.buffer.edges.push(edge);
            visit(edge)?;
        }
        debug!(edges = self.buffer.len(), "buffered body for replay");
        Ok(())
    }
}

/// Text body re-read from a seekable source on every pass
pub struct Rewinding<R, P> {
    lines: LineReader<R>,
    parser: P,
    data_start: u64,
    data_line: usize,
}

impl<R: BufRead + Seek, P> Rewinding<R, P> {
    /// Records the current position of `lines` as the start of the body
    pub fn new(mut lines: LineReader<R>, parser: P) -> Result<Self> {
        let data_start = lines.get_mut().stream_position()?;
        let data_line = lines.line_number();
        Ok(Self {
            lines,
            parser,
            data_start,
            data_line,
        })
    }
}

impl<R: BufRead + Seek, P: EdgeParser<T>, T> EdgeStream<T> for Rewinding<R, P> {
    fn pass(&mut self, visit: &mut dyn FnMut(Edge<T>) -> Result<()>) -> Result<()> {
        self.lines.get_mut().seek(SeekFrom::Start(self.data_start))?;
        self.lines.set_line_number(self.data_line);

        while let Some((number, line)) = self.lines.next_data_line()? {
            let edge = self.parser.parse(line, number)?;
            visit(edge)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormatError;
    use crate::text::tokens;
    use std::io::Cursor;

    struct Pair;

    impl EdgeParser<f64> for Pair {
        fn parse(&mut self, line: &str, number: usize) -> Result<Edge<f64>> {
            let toks = tokens(line);
            let row = toks[0].parse().map_err(|_| FormatError::entry(number, toks[0]))?;
            let col = toks[1].parse().map_err(|_| FormatError::entry(number, toks[1]))?;
            Ok(Edge::new(row, col, None, number))
        }
    }

    fn collect<S: EdgeStream<f64>>(stream: &mut S) -> Vec<(usize, usize, usize)> {
        let mut seen = Vec::new();
        stream
            .pass(&mut |e| {
                seen.push((e.row, e.col, e.line));
                Ok(())
            })
            .unwrap();
        seen
    }

    #[test]
    fn test_buffered_replays_same_edges() {
        let lines = LineReader::new(Cursor::new("0 1\n# skip\n\n2 3\n"), '#');
        let mut stream = Buffered::new(lines, Pair);

        let first = collect(&mut stream);
        let second = collect(&mut stream);
        assert_eq!(first, vec![(0, 1, 1), (2, 3, 4)]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_rewinding_restarts_after_header() {
        let mut lines = LineReader::new(Cursor::new("header\n0 1\n2 3\n"), '#');
        lines.next_line().unwrap();
        let mut stream = Rewinding::new(lines, Pair).unwrap();

        let first = collect(&mut stream);
        let second = collect(&mut stream);
        assert_eq!(first, vec![(0, 1, 2), (2, 3, 3)]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_error_stops_pass() {
        let lines = LineReader::new(Cursor::new("0 1\nx 3\n"), '#');
        let mut stream = Buffered::new(lines, Pair);
        let err = stream.pass(&mut |_| Ok(())).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::MalformedEntry);
    }

    /// Weight type without a `Default` impl
    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Label(char);

    struct Labelled;

    impl EdgeParser<Label> for Labelled {
        fn parse(&mut self, line: &str, number: usize) -> Result<Edge<Label>> {
            let label = line.chars().next().map(Label);
            Ok(Edge::new(number, 0, label, number))
        }
    }

    #[test]
    fn test_buffered_weights_need_only_copy() {
        let lines = LineReader::new(Cursor::new("a
b
"), '#');
        let mut stream = Buffered::new(lines, Labelled);

        let mut labels = Vec::new();
        for _ in 0..2 {
            stream
                .pass(&mut |e| {
                    labels.push(e.weight);
                    Ok(())
                })
                .unwrap();
        }
        assert_eq!(labels, vec![Some(Label('a')), Some(Label('b')), Some(Label('a')), Some(Label('b'))]);
    }
}
