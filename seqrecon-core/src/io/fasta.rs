use crate::error::{BioError, BioResult};
use crate::seq::record::SeqRecord;
use crate::seq::traits::SeqBytes;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Cursor, Write};
use std::marker::PhantomData;
use std::path::Path;

pub struct FastaRecords<R, S> {
    reader: R,
    line_no: usize,
    pending_header: Option<(String, usize)>,
    buf_line: String,
    seq_buf: Vec<u8>,
    _marker: PhantomData<S>,
}

impl<R: BufRead, S: SeqBytes> FastaRecords<R, S> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            pending_header: None,
            buf_line: String::new(),
            seq_buf: Vec::new(),
            _marker: PhantomData,
        }
    }

    fn read_line(&mut self) -> BioResult<bool> {
        self.buf_line.clear();
        let n = self.reader.read_line(&mut self.buf_line)?;
        if n > 0 {
            self.line_no += 1;
        }
        Ok(n > 0)
    }

    fn next_header(&mut self) -> BioResult<Option<(String, usize)>> {
        if let Some(pending) = self.pending_header.take() {
            return Ok(Some(pending));
        }

        while self.read_line()? {
            if self.buf_line.starts_with('>') {
                return Ok(Some((self.buf_line.clone(), self.line_no)));
            }
            if self.buf_line.trim().is_empty() {
                continue;
            }
            return Err(BioError::FastaFormat {
                msg: "expected header line starting with '>'",
                line: self.line_no,
            });
        }
        Ok(None)
    }

    fn next_record(&mut self) -> BioResult<Option<SeqRecord<S>>> {
        let Some((header_line, header_line_no)) = self.next_header()? else {
            return Ok(None);
        };
        let (id, desc) = parse_header(&header_line, header_line_no)?;

        self.seq_buf.clear();
        while self.read_line()? {
            if self.buf_line.starts_with('>') {
                self.pending_header = Some((self.buf_line.clone(), self.line_no));
                break;
            }
            self.seq_buf
                .extend(self.buf_line.bytes().filter(|b| !b.is_ascii_whitespace()));
        }

        let seq = S::from_bytes(std::mem::take(&mut self.seq_buf))?;
        Ok(Some(SeqRecord { id, desc, seq }))
    }
}

impl<R: BufRead, S: SeqBytes> Iterator for FastaRecords<R, S> {
    type Item = BioResult<SeqRecord<S>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

pub fn fasta_records_from_reader<R: BufRead, S: SeqBytes>(reader: R) -> FastaRecords<R, S> {
    FastaRecords::new(reader)
}

pub fn read_fasta_records_from_reader<R: BufRead, S: SeqBytes>(
    reader: R,
) -> BioResult<Vec<SeqRecord<S>>> {
    fasta_records_from_reader(reader).collect()
}

pub fn read_fasta_records_from_path<S: SeqBytes>(
    path: impl AsRef<Path>,
) -> BioResult<Vec<SeqRecord<S>>> {
    let file = File::open(path)?;
    read_fasta_records_from_reader(BufReader::new(file))
}

pub fn read_fasta_records_from_bytes<S: SeqBytes>(data: &[u8]) -> BioResult<Vec<SeqRecord<S>>> {
    read_fasta_records_from_reader(BufReader::new(Cursor::new(data)))
}

fn parse_header(header_line: &str, line_no: usize) -> BioResult<(Box<str>, Option<Box<str>>)> {
    let header = header_line.strip_prefix('>').ok_or(BioError::FastaFormat {
        msg: "expected header line starting with '>'",
        line: line_no,
    })?;

    let header = header.trim_end_matches(&['\n', '\r'][..]).trim_start();
    if header.is_empty() {
        return Err(BioError::FastaFormat {
            msg: "empty header",
            line: line_no,
        });
    }

    let (id, desc) = match header.find(|c: char| c.is_whitespace()) {
        Some(idx) => {
            let desc = header[idx..].trim();
            (&header[..idx], (!desc.is_empty()).then_some(desc))
        }
        None => (header, None),
    };

    Ok((id.into(), desc.map(|s| s.into())))
}

/// Writes one header line and the sequence on a single line per record.
pub struct FastaWriter<W: Write> {
    inner: W,
    written: usize,
}

impl<W: Write> FastaWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, written: 0 }
    }

    pub fn write(&mut self, header: &str, seq: &[u8]) -> BioResult<()> {
        self.inner.write_all(b">")?;
        self.inner.write_all(header.as_bytes())?;
        self.inner.write_all(b"\n")?;
        self.inner.write_all(seq)?;
        self.inner.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }

    pub fn write_record<S: SeqBytes>(&mut self, record: &SeqRecord<S>) -> BioResult<()> {
        self.write(&record.header(), record.seq().as_bytes())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn finish(mut self) -> BioResult<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

pub fn create_fasta_writer(path: impl AsRef<Path>) -> BioResult<FastaWriter<BufWriter<File>>> {
    let file = File::create(path)?;
    Ok(FastaWriter::new(BufWriter::new(file)))
}
