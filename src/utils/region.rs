use crate::utils::Result;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct GenomicRegion {
    pub contig: String,
    pub start: u32,
    pub end: u32,
}

impl GenomicRegion {
    pub fn new(contig: impl Into<String>, start: u32, end: u32) -> Result<Self> {
        if start >= end {
            return Err(format!("Invalid region: start {} >= end {}", start, end));
        }

        Ok(Self {
            contig: contig.into(),
            start,
            end,
        })
    }

    pub fn from_string(encoding: &str) -> Result<Self> {
        let error_msg = || format!("Invalid region encoding: {}", encoding);
        let (contig, interval) = encoding.rsplit_once(':').ok_or_else(error_msg)?;
        let (start, end) = interval.split_once('-').ok_or_else(error_msg)?;
        if contig.is_empty() || contig.contains(':') {
            return Err(error_msg());
        }

        let start: u32 = parse_coordinate(start).ok_or_else(error_msg)?;
        let end: u32 = parse_coordinate(end).ok_or_else(error_msg)?;

        Self::new(contig, start, end)
    }

    /// Inclusive on both ends
    pub fn intersect_position(&self, position: u32) -> bool {
        position >= self.start && position <= self.end
    }

    pub fn midpoint(&self) -> f64 {
        (self.start as f64 + self.end as f64) / 2.0
    }
}

impl fmt::Display for GenomicRegion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}-{}", self.contig, self.start, self.end)
    }
}

// Accepts thousands separators as printed by genome browsers (chr1:1,000-2,000)
fn parse_coordinate(value: &str) -> Option<u32> {
    value.replace(',', "").parse().ok()
}
