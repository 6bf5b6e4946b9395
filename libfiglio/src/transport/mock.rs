// libfiglio/src/transport/mock.rs

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::geometry::Geometry;
use crate::transport::traits::Transport;
use crate::types::{BlockData, KeyA, Uid};
use crate::{Error, Result};

/// One driver call as seen by the mock, in call order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockCall {
    Reset,
    Request,
    Anticollision,
    Select,
    Authenticate(u8),
    Read(u8),
    Write(u8),
    StopCrypto,
}

#[derive(Debug)]
struct MockCard {
    uid: Uid,
    sak: u8,
    memory: Vec<BlockData>,
    keys: HashMap<u8, KeyA>,
}

#[derive(Debug)]
struct MockState {
    geometry: Geometry,
    card: Option<MockCard>,
    authenticated: Option<u8>,
    request_failures: usize,
    select_failures: usize,
    auth_failures: HashSet<u8>,
    read_failures: HashSet<u8>,
    write_failures: HashSet<u8>,
    short_reads: HashSet<u8>,
    remove_after: Option<usize>,
    calls: Vec<MockCall>,
}

/// Mock reader driver for unit tests. It simulates one MIFARE Classic card
/// in the field (memory image, per-sector keys, the authentication
/// precondition of real hardware) and records every call.
///
/// The handle is cheap to clone and all clones share one simulated reader,
/// so a test can hand a clone to a `Reader` and keep another for
/// assertions.
#[derive(Debug, Clone)]
pub struct MockTransport {
    inner: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// Reader with no card in the field.
    pub fn new(geometry: Geometry) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockState {
                geometry,
                card: None,
                authenticated: None,
                request_failures: 0,
                select_failures: 0,
                auth_failures: HashSet::new(),
                read_failures: HashSet::new(),
                write_failures: HashSet::new(),
                short_reads: HashSet::new(),
                remove_after: None,
                calls: Vec::new(),
            })),
        }
    }

    /// Classic 1K reader with a blank card carrying `nuid` in the field.
    pub fn with_card(nuid: [u8; 4]) -> Self {
        let mock = Self::new(Geometry::classic_1k());
        mock.insert_card(Uid::from_nuid(nuid));
        mock
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Place a blank (all-zero, transport-keyed) card in the field.
    pub fn insert_card(&self, uid: Uid) {
        let mut s = self.state();
        let memory = vec![BlockData::zeroed(); s.geometry.total_blocks()];
        let keys = s
            .geometry
            .sectors()
            .iter()
            .map(|sector| (sector.trailer(), sector.key_a()))
            .collect();
        let sak = match s.geometry.class() {
            Some(crate::types::CardClass::Classic4k) => 0x18,
            _ => 0x08,
        };
        s.card = Some(MockCard {
            uid,
            sak,
            memory,
            keys,
        });
        s.authenticated = None;
    }

    pub fn remove_card(&self) {
        let mut s = self.state();
        s.card = None;
        s.authenticated = None;
    }

    /// The next `n` REQA commands fail as if the card were out of range.
    pub fn fail_requests(&self, n: usize) {
        self.state().request_failures = n;
    }

    /// The next `n` SELECT commands fail after the card has answered
    /// REQA and anticollision, as with a card at the edge of the field.
    pub fn fail_selects(&self, n: usize) {
        self.state().select_failures = n;
    }

    pub fn fail_auth(&self, trailer: u8) {
        self.state().auth_failures.insert(trailer);
    }

    pub fn fail_read(&self, block: u8) {
        self.state().read_failures.insert(block);
    }

    pub fn fail_write(&self, block: u8) {
        self.state().write_failures.insert(block);
    }

    /// Reads of `block` report success but return 15 bytes.
    pub fn short_read(&self, block: u8) {
        self.state().short_reads.insert(block);
    }

    /// The card leaves the field after `ops` more block reads/writes.
    pub fn remove_card_after(&self, ops: usize) {
        self.state().remove_after = Some(ops);
    }

    /// Change the key stored on the card for one sector. The geometry the
    /// host uses stays untouched, so this simulates a key mismatch.
    pub fn set_card_key(&self, trailer: u8, key: KeyA) {
        if let Some(card) = self.state().card.as_mut() {
            card.keys.insert(trailer, key);
        }
    }

    pub fn set_block(&self, block: u8, data: BlockData) {
        if let Some(card) = self.state().card.as_mut() {
            card.memory[block as usize] = data;
        }
    }

    pub fn block(&self, block: u8) -> Option<BlockData> {
        self.state()
            .card
            .as_ref()
            .map(|card| card.memory[block as usize])
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.state().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    pub fn auth_calls(&self) -> Vec<u8> {
        self.state()
            .calls
            .iter()
            .filter_map(|c| match c {
                MockCall::Authenticate(b) => Some(*b),
                _ => None,
            })
            .collect()
    }

    pub fn authenticated(&self) -> Option<u8> {
        self.state().authenticated
    }
}

impl MockState {
    fn card(&self) -> Result<&MockCard> {
        self.card
            .as_ref()
            .ok_or_else(|| Error::Driver("no tag in field".into()))
    }

    // Counts down the removal budget; the card disappears once it hits zero.
    fn tick_removal(&mut self) {
        match self.remove_after {
            Some(0) => {
                self.card = None;
                self.authenticated = None;
                self.remove_after = None;
            }
            Some(n) => self.remove_after = Some(n - 1),
            None => {}
        }
    }

    fn check_access(&self, block: u8) -> Result<()> {
        self.card()?;
        let trailer = self
            .geometry
            .sector_trailer_of(block)
            .map_err(|_| Error::Driver(format!("no such block {}", block)))?;
        if self.authenticated != Some(trailer) {
            return Err(Error::Driver(format!(
                "block {} accessed without sector authentication",
                block
            )));
        }
        Ok(())
    }
}

impl Transport for MockTransport {
    fn reset(&mut self) -> Result<()> {
        let mut s = self.state();
        s.calls.push(MockCall::Reset);
        s.authenticated = None;
        Ok(())
    }

    fn request(&mut self) -> Result<()> {
        let mut s = self.state();
        s.calls.push(MockCall::Request);
        if s.request_failures > 0 {
            s.request_failures -= 1;
            return Err(Error::Driver("no answer to REQA".into()));
        }
        s.card().map(|_| ())
    }

    fn anticollision(&mut self) -> Result<Uid> {
        let mut s = self.state();
        s.calls.push(MockCall::Anticollision);
        s.card().map(|c| c.uid)
    }

    fn select(&mut self, uid: &Uid) -> Result<u8> {
        let mut s = self.state();
        s.calls.push(MockCall::Select);
        if s.select_failures > 0 {
            s.select_failures -= 1;
            return Err(Error::Driver("select: no SAK".into()));
        }
        let card = s.card()?;
        if card.uid != *uid {
            return Err(Error::Driver("select: uid mismatch".into()));
        }
        Ok(card.sak)
    }

    fn authenticate(&mut self, uid: &Uid, block: u8, key: &KeyA) -> Result<()> {
        let mut s = self.state();
        s.calls.push(MockCall::Authenticate(block));
        s.authenticated = None;

        let trailer = s
            .geometry
            .sector_trailer_of(block)
            .map_err(|_| Error::Driver(format!("no such block {}", block)))?;
        if s.auth_failures.contains(&trailer) {
            return Err(Error::Driver("auth: no response".into()));
        }
        let card = s.card()?;
        if card.uid != *uid || card.keys.get(&trailer) != Some(key) {
            return Err(Error::Driver("auth: key rejected".into()));
        }
        s.authenticated = Some(trailer);
        Ok(())
    }

    fn read(&mut self, block: u8) -> Result<Vec<u8>> {
        let mut s = self.state();
        s.calls.push(MockCall::Read(block));
        s.tick_removal();
        s.check_access(block)?;
        if s.read_failures.contains(&block) {
            return Err(Error::Driver("read: crc error".into()));
        }
        let data = s.card()?.memory[block as usize];
        if s.short_reads.contains(&block) {
            return Ok(data.as_bytes()[..15].to_vec());
        }
        Ok(data.as_bytes().to_vec())
    }

    fn write(&mut self, block: u8, data: &BlockData) -> Result<()> {
        let mut s = self.state();
        s.calls.push(MockCall::Write(block));
        s.tick_removal();
        s.check_access(block)?;
        if s.write_failures.contains(&block) {
            return Err(Error::Driver("write: nak".into()));
        }
        if !s.geometry.is_data_block(block) {
            return Err(Error::Driver(format!("block {} is not writable", block)));
        }
        if let Some(card) = s.card.as_mut() {
            card.memory[block as usize] = *data;
        }
        Ok(())
    }

    fn stop_crypto(&mut self) -> Result<()> {
        let mut s = self.state();
        s.calls.push(MockCall::StopCrypto);
        s.authenticated = None;
        Ok(())
    }
}
