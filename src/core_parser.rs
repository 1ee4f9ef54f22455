use crate::errors::ParseError;
use crate::parsing_utils::{be_f32, be_u16, be_u32, decode_str, le_f32, le_u16, le_u32, Endian};

#[derive(Debug, Clone, PartialEq)]
pub struct CoreParser<'a> {
    data: &'a [u8],

    /// Current offset in regards to the whole view of the replay
    col: usize,

    /// Start of the field currently being framed. Readers that overshoot or undershoot a
    /// declared size reconcile against this instead of individual field boundaries.
    mark: usize,
}

impl<'a> CoreParser<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        CoreParser {
            data,
            col: 0,
            mark: 0,
        }
    }

    /// Creates a parser that resumes at `col` of the same buffer, so reported offsets stay
    /// relative to the start of the replay
    pub fn at(data: &'a [u8], col: usize) -> Self {
        CoreParser {
            data,
            col,
            mark: col,
        }
    }

    pub fn bytes_read(&self) -> usize {
        self.col
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.col)
    }

    /// Errors with `BufferUnderrun` unless `size` more bytes can be read
    pub fn ensure_available(&self, size: usize) -> Result<(), ParseError> {
        if size > self.remaining() {
            Err(ParseError::BufferUnderrun(size, self.remaining()))
        } else {
            Ok(())
        }
    }

    /// Returns a slice of the replay after ensuring there is enough space for the requested slice
    pub fn view_data(&self, size: usize) -> Result<&'a [u8], ParseError> {
        self.ensure_available(size)?;
        Ok(&self.data[self.col..self.col + size])
    }

    pub fn take_data(&mut self, size: usize) -> Result<&'a [u8], ParseError> {
        let res = self.view_data(size)?;
        self.col += size;
        Ok(res)
    }

    /// Take the next `size` of bytes and interpret them in an infallible fashion
    #[inline]
    pub fn take<F, T>(&mut self, size: usize, mut f: F) -> Result<T, ParseError>
    where
        F: FnMut(&'a [u8]) -> T,
    {
        self.take_data(size).map(|data| f(data))
    }

    /// Used for skipping over data that has not been identified
    pub fn skip(&mut self, size: usize) -> Result<(), ParseError> {
        self.take(size, |_| ())
    }

    /// Offset of the next occurrence of `byte` at or after the current position
    pub fn find(&self, byte: u8) -> Option<usize> {
        self.data[self.col.min(self.data.len())..]
            .iter()
            .position(|&x| x == byte)
            .map(|ind| self.col + ind)
    }

    pub fn take_u8(&mut self) -> Result<u8, ParseError> {
        self.take(1, |d| d[0])
    }

    pub fn take_u16(&mut self) -> Result<u16, ParseError> {
        self.take(2, le_u16)
    }

    pub fn take_u32(&mut self) -> Result<u32, ParseError> {
        self.take(4, le_u32)
    }

    pub fn take_f32(&mut self) -> Result<f32, ParseError> {
        self.take_f32_endian(Endian::Little)
    }

    pub fn take_f32_endian(&mut self, endian: Endian) -> Result<f32, ParseError> {
        match endian {
            Endian::Little => self.take(4, le_f32),
            Endian::Big => self.take(4, be_f32),
        }
    }

    /// Reads a little endian unsigned integer of 1, 2, or 4 bytes
    pub fn take_uint(&mut self, width: usize) -> Result<u32, ParseError> {
        self.take_uint_endian(width, Endian::Little)
    }

    /// Replays declare some 4 byte fields as 3 bytes wide. Those are read (and consumed) as
    /// 4 byte integers.
    pub fn take_uint_endian(&mut self, width: usize, endian: Endian) -> Result<u32, ParseError> {
        match (width, endian) {
            (1, _) => self.take_u8().map(u32::from),
            (2, Endian::Little) => self.take(2, le_u16).map(u32::from),
            (2, Endian::Big) => self.take(2, be_u16).map(u32::from),
            (3 | 4, Endian::Little) => self.take(4, le_u32),
            (3 | 4, Endian::Big) => self.take(4, be_u32),
            _ => Err(ParseError::UnsupportedWidth(width)),
        }
    }

    /// Parses a string prefixed by its byte length, where the prefix itself is `width` bytes
    pub fn parse_text(&mut self, width: usize) -> Result<String, ParseError> {
        let size = self.take_uint(width)? as usize;
        self.take(size, decode_str)
    }

    /// Parses a null terminated string stored in a fixed size slot. The whole slot is
    /// consumed no matter where the terminator sits.
    pub fn parse_fixed_text(&mut self, slot: usize) -> Result<String, ParseError> {
        let data = self.view_data(slot)?;
        let end = data
            .iter()
            .position(|&x| x == 0)
            .ok_or(ParseError::UnterminatedString(slot))?;
        self.col += slot;
        Ok(decode_str(&data[..end]))
    }

    /// Asserts that the next bytes are `expected`. Every byte is compared before reporting
    /// the first mismatch, and the parser moves past the sequence either way.
    pub fn expect_bytes(&mut self, expected: &[u8]) -> Result<(), ParseError> {
        let start = self.col;
        let actual = self.take_data(expected.len())?;
        let mismatch = expected
            .iter()
            .zip(actual.iter())
            .enumerate()
            .filter(|(_, (e, a))| e != a)
            .map(|(i, (&e, &a))| ParseError::HeaderMismatch {
                expected: e,
                actual: Some(a),
                position: start + i,
            })
            .next();

        match mismatch {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Marks the current position as the start of a new framed field
    pub fn mark(&mut self) {
        self.mark = self.col;
    }

    pub fn consumed_since_mark(&self) -> usize {
        self.col.saturating_sub(self.mark)
    }

    /// Moves forward so that at least `size` bytes have been consumed since the mark. Never
    /// moves backwards when more than `size` bytes were already consumed. Returns the number
    /// of bytes skipped.
    pub fn pad_to_mark(&mut self, size: usize) -> Result<usize, ParseError> {
        let shortfall = size.saturating_sub(self.consumed_since_mark());
        self.skip(shortfall)?;
        Ok(shortfall)
    }

    /// Repeatedly parse the same elements from replay until `size` elements parsed
    pub fn repeat<F, T>(size: usize, limit: usize, mut f: F) -> Result<Vec<T>, ParseError>
    where
        F: FnMut() -> Result<T, ParseError>,
    {
        if size > limit {
            return Err(ParseError::ListTooLarge(size));
        }

        let mut res = Vec::with_capacity(size);
        for _ in 0..size {
            res.push(f()?);
        }
        Ok(res)
    }

    pub fn list_of<F, T>(&mut self, limit: usize, mut f: F) -> Result<Vec<T>, ParseError>
    where
        F: FnMut(&mut Self) -> Result<T, ParseError>,
    {
        let size = self.take_u32()? as usize;
        CoreParser::repeat(size, limit, || f(self))
    }
}
