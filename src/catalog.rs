// Hotel catalog backed by an append-only text log

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

// Error types for catalog persistence
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed record at line {line}: {text:?}")]
    MalformedRecord { line: usize, text: String },
}

/// A single hotel record. Immutable once created; the catalog never updates
/// or deletes records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: u32,
    pub name: String,
    pub price: u32,
    pub rating: f64,
    pub distance: f64,
}

impl Hotel {
    pub fn confirmation(&self) -> String {
        format!("Hotel added successfully with ID: H{}", self.id)
    }
}

impl fmt::Display for Hotel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "H{} {}", self.id, self.name)?;
        writeln!(f, "Price: ${}", self.price)?;
        writeln!(f, "Rating: {}", self.rating)?;
        write!(f, "Distance: {} km", self.distance)
    }
}

/// Insertion-ordered hotel catalog persisted to a flat text log, one record
/// per line: `id name price rating distance`.
///
/// The format is whitespace-delimited, so hotel names must not contain
/// whitespace; a multi-word name is written as-is and truncates the catalog
/// on the next reload. Input validation is the caller's responsibility.
pub struct CatalogStore {
    path: PathBuf,
    hotels: Vec<Hotel>,
}

impl CatalogStore {
    /// Binds the store to its backing log and performs the initial load.
    /// A missing or unreadable log yields an empty catalog.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut store = Self {
            path: path.into(),
            hotels: Vec::new(),
        };
        store.reload();
        store
    }

    /// Ordered snapshot, creation order.
    pub fn hotels(&self) -> &[Hotel] {
        &self.hotels
    }

    pub fn is_empty(&self) -> bool {
        self.hotels.is_empty()
    }

    /// Appends a new hotel with id `max(existing) + 1` (1 on an empty
    /// catalog) and durably appends one record to the log. A write failure
    /// is logged and not propagated; the in-memory catalog keeps the record.
    pub fn add_hotel(&mut self, name: &str, price: u32, rating: f64, distance: f64) -> Hotel {
        let next_id = self.hotels.iter().map(|h| h.id).max().unwrap_or(0) + 1;
        let hotel = Hotel {
            id: next_id,
            name: name.to_string(),
            price,
            rating,
            distance,
        };

        self.hotels.push(hotel.clone());
        match self.append_record(&hotel) {
            Ok(()) => info!(id = hotel.id, name = %hotel.name, "hotel appended to log"),
            Err(e) => warn!(path = %self.path.display(), error = %e, "failed to append hotel record"),
        }

        hotel
    }

    /// Discards in-memory state and re-parses the entire log, picking up
    /// out-of-band changes. Parsing stops at the first malformed line; the
    /// records read so far are kept and the rest of the file is ignored.
    pub fn reload(&mut self) {
        self.hotels.clear();

        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "catalog log unavailable, starting empty");
                return;
            }
        };

        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    warn!(line = idx + 1, error = %e, "failed to read catalog log");
                    break;
                }
            };
            match parse_record(idx + 1, &line) {
                Ok(hotel) => self.hotels.push(hotel),
                Err(e) => {
                    warn!(error = %e, "stopping catalog read");
                    break;
                }
            }
        }

        info!(count = self.hotels.len(), "catalog loaded");
    }

    fn append_record(&self, hotel: &Hotel) -> Result<(), CatalogError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(
            file,
            "{} {} {} {} {}",
            hotel.id, hotel.name, hotel.price, hotel.rating, hotel.distance
        )?;
        Ok(())
    }
}

fn parse_record(line_no: usize, line: &str) -> Result<Hotel, CatalogError> {
    let malformed = || CatalogError::MalformedRecord {
        line: line_no,
        text: line.to_string(),
    };

    let fields: Vec<&str> = line.split_whitespace().collect();
    let &[id, name, price, rating, distance] = &fields[..] else {
        return Err(malformed());
    };

    Ok(Hotel {
        id: id.parse().map_err(|_| malformed())?,
        name: name.to_string(),
        price: price.parse().map_err(|_| malformed())?,
        rating: rating.parse().map_err(|_| malformed())?,
        distance: distance.parse().map_err(|_| malformed())?,
    })
}
