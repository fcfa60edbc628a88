/*
 * Listeners
 * observers attached to an inclusive address range of a RAM block. They are
 * called back synchronously, in installation order, on each access whose
 * address falls in their range. Ranges may overlap freely.
 */
use super::{Addr, Word};
use range_map::Range;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Called on each read of an address in the listener's range.
pub trait ReadListener {
    fn on_read(&mut self, addr: Addr);
}

/// Called on each write of an address in the listener's range, with the
/// newly stored word.
pub trait WriteListener {
    fn on_write(&mut self, addr: Addr, value: Word);
}

impl<F> ReadListener for F
where
    F: FnMut(Addr),
{
    fn on_read(&mut self, addr: Addr) {
        self(addr)
    }
}

impl<F> WriteListener for F
where
    F: FnMut(Addr, Word),
{
    fn on_write(&mut self, addr: Addr, value: Word) {
        self(addr, value)
    }
}

// A listener shared with its owner, which keeps a handle on it.
impl<L> ReadListener for Rc<RefCell<L>>
where
    L: ReadListener + ?Sized,
{
    fn on_read(&mut self, addr: Addr) {
        self.borrow_mut().on_read(addr)
    }
}

impl<L> WriteListener for Rc<RefCell<L>>
where
    L: WriteListener + ?Sized,
{
    fn on_write(&mut self, addr: Addr, value: Word) {
        self.borrow_mut().on_write(addr, value)
    }
}

struct Entry<L: ?Sized> {
    range: Range<Addr>,
    listener: Box<L>,
}

/// Listeners kept in installation order.
pub struct ListenerList<L: ?Sized> {
    entries: Vec<Entry<L>>,
}

impl<L: ?Sized> Default for ListenerList<L> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<L: ?Sized> ListenerList<L> {
    /// Appends a listener watching `low..=high`. There is neither
    /// deduplication nor merging of ranges.
    pub fn install(&mut self, low: Addr, high: Addr, listener: Box<L>) {
        debug_assert!(low <= high, "empty listener range #0x{:08X} → #0x{:08X}", low, high);
        self.entries.push(Entry {
            range: Range {
                start: low,
                end: high,
            },
            listener,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn matching(&mut self, addr: Addr) -> impl Iterator<Item = &mut L> + '_ {
        self.entries
            .iter_mut()
            .filter(move |entry| entry.range.contains(addr))
            .map(|entry| entry.listener.as_mut())
    }
}

impl ListenerList<dyn ReadListener> {
    pub fn fire_read(&mut self, addr: Addr) {
        for listener in self.matching(addr) {
            listener.on_read(addr);
        }
    }
}

impl ListenerList<dyn WriteListener> {
    pub fn fire_write(&mut self, addr: Addr, value: Word) {
        for listener in self.matching(addr) {
            listener.on_write(addr, value);
        }
    }
}

impl<L: ?Sized> fmt::Debug for ListenerList<L> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list()
            .entries(
                self.entries
                    .iter()
                    .map(|entry| format!("#0x{:08X} → #0x{:08X}", entry.range.start, entry.range.end)),
            )
            .finish()
    }
}
