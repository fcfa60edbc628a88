/*
 * Page store
 *
 * A flat array of 2³² words cannot be allocated, so the address space is cut
 * in pages that are only created when some address inside them is touched.
 * Pages are indexed by their base address in an open addressing hash table
 * (linear probing). The table doubles its bucket count when an insertion
 * finds it full.
 */
use super::{page_base, Addr, Word};
use std::fmt;
use tracing::{debug, trace};

/// Bucket count of a new store, must be a power of two.
pub const INITIAL_BUCKET_COUNT: usize = 64;

const HASH_FACTOR: u32 = 0x045d_9f3b;

// 32 bits avalanche mixer, spreads neighbouring page bases over the table.
pub(crate) fn hash(addr: Addr) -> u32 {
    let mut x = addr;
    x = ((x >> 16) ^ x).wrapping_mul(HASH_FACTOR);
    x = ((x >> 16) ^ x).wrapping_mul(HASH_FACTOR);
    (x >> 16) ^ x
}

/// A block of contiguous words starting at its base address.
pub struct Page {
    base: Addr,
    words: Box<[Word]>,
}

impl Page {
    fn zeroed(base: Addr, page_words: u32) -> Page {
        Page {
            base,
            words: vec![0; page_words as usize].into_boxed_slice(),
        }
    }

    pub fn base(&self) -> Addr {
        self.base
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn words_mut(&mut self) -> &mut [Word] {
        &mut self.words
    }

    /// `addr` must belong to this page.
    pub fn get(&self, addr: Addr) -> Word {
        self.words[self.offset(addr)]
    }

    /// `addr` must belong to this page.
    pub fn set(&mut self, addr: Addr, value: Word) {
        let offset = self.offset(addr);
        self.words[offset] = value;
    }

    fn offset(&self, addr: Addr) -> usize {
        (addr - self.base) as usize
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Page #0x{:08X} → #0x{:08X}",
            self.base,
            self.base as u64 + self.words.len() as u64 - 1
        )
    }
}

pub struct PageStore {
    slots: Vec<Option<Page>>,
    page_count: usize,
    page_words: u32,
}

impl PageStore {
    pub fn new(page_words: u32) -> Self {
        debug_assert!(page_words.is_power_of_two());

        Self {
            slots: empty_slots(INITIAL_BUCKET_COUNT),
            page_count: 0,
            page_words,
        }
    }

    /// Bucket count of the hash table.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn page_words(&self) -> u32 {
        self.page_words
    }

    /// Base address of the page holding `addr`.
    pub fn base_of(&self, addr: Addr) -> Addr {
        page_base(addr, self.page_words)
    }

    /// Returns the slot holding `base` or, when absent, the first empty
    /// slot met while probing. A full table without `base` yields the
    /// slot where the probe started.
    pub fn find(&self, base: Addr) -> usize {
        probe(&self.slots, base)
    }

    /// Looks a page up without creating it.
    pub fn get(&self, base: Addr) -> Option<&Page> {
        self.slots[self.find(base)]
            .as_ref()
            .filter(|page| page.base == base)
    }

    /// The returned reference is only valid until the next insertion, which
    /// may reseat every page in a new slot array.
    pub fn get_or_create(&mut self, base: Addr) -> &mut Page {
        debug_assert_eq!(base, self.base_of(base));
        let mut index = self.find(base);

        if !self.holds(index, base) {
            if self.page_count == self.capacity() {
                self.grow();
                index = self.find(base);
            }
            self.page_count += 1;
            trace!(base, pages = self.page_count, "page created");
        }

        let page_words = self.page_words;
        self.slots[index].get_or_insert_with(|| Page::zeroed(base, page_words))
    }

    /// Doubles the bucket count and reinserts every page. Word buffers are
    /// moved, not copied.
    pub fn grow(&mut self) {
        let capacity = self.capacity() * 2;
        let mut slots = empty_slots(capacity);

        for page in self.slots.drain(..).flatten() {
            let index = probe(&slots, page.base);
            slots[index] = Some(page);
        }
        self.slots = slots;
        debug!(capacity, pages = self.page_count, "page table grown");
    }

    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.slots.iter().flatten()
    }

    fn holds(&self, index: usize, base: Addr) -> bool {
        matches!(&self.slots[index], Some(page) if page.base == base)
    }
}

impl fmt::Debug for PageStore {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "PageStore {} pages of {} words, {} buckets",
            self.page_count,
            self.page_words,
            self.capacity()
        )
    }
}

fn empty_slots(count: usize) -> Vec<Option<Page>> {
    std::iter::repeat_with(|| None).take(count).collect()
}

fn probe(slots: &[Option<Page>], base: Addr) -> usize {
    // the slot count is a power of two, masking keeps the index in bounds
    let mask = slots.len() - 1;
    let start = hash(base) as usize & mask;
    let mut index = start;

    loop {
        match &slots[index] {
            Some(page) if page.base != base => (),
            _ => return index,
        }
        index = (index + 1) & mask;
        if index == start {
            return start;
        }
    }
}
