use super::*;
use std::fmt;
use std::path::Path;
use tracing::debug;

/*
 * RAM
 * a block spanning the whole 32 bits address space, initialized to zero.
 * Only the pages holding addresses that were actually accessed get memory.
 */
pub struct Ram {
    pages: PageStore,
    #[cfg(feature = "read-listeners")]
    read_listeners: ListenerList<dyn ReadListener>,
    #[cfg(feature = "write-listeners")]
    write_listeners: ListenerList<dyn WriteListener>,
}

impl Default for Ram {
    fn default() -> Self {
        Self::with_config(RamConfig::default())
    }
}

impl Ram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RamConfig) -> Self {
        let mut pages = PageStore::new(config.page_words());
        // the region [0, page size) always exists
        pages.get_or_create(0);

        Self {
            pages,
            #[cfg(feature = "read-listeners")]
            read_listeners: ListenerList::default(),
            #[cfg(feature = "write-listeners")]
            write_listeners: ListenerList::default(),
        }
    }

    /// A RAM block holding `data[i]` at address `i`.
    pub fn from_words(data: &[Word]) -> Self {
        let mut ram = Self::new();
        ram.init(data);

        ram
    }

    /// A RAM block initialized with the words of the given file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MemoryError> {
        load_words(path).map(|data| Self::from_words(&data))
    }

    /// Same as [`Ram::load`] but a failure terminates the process.
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| fatal(&e))
    }

    /// Copies `data` at the beginning of the memory, page by page.
    /// Listeners are not triggered.
    pub fn init(&mut self, data: &[Word]) {
        debug_assert!(data.len() as u64 <= 1 << Addr::BITS);
        let page_words = self.pages.page_words() as usize;

        for (index, chunk) in data.chunks(page_words).enumerate() {
            let base = (index * page_words) as Addr;
            self.pages.get_or_create(base).words_mut()[..chunk.len()].copy_from_slice(chunk);
        }
        debug!(words = data.len(), "RAM initialized");
    }

    pub fn get(&mut self, addr: Addr) -> Word {
        let page = self.pages.get_or_create(page_base(addr, self.pages.page_words()));
        #[cfg(feature = "read-listeners")]
        self.read_listeners.fire_read(addr);

        page.get(addr)
    }

    pub fn set(&mut self, addr: Addr, value: Word) {
        let page = self.pages.get_or_create(page_base(addr, self.pages.page_words()));
        page.set(addr, value);
        #[cfg(feature = "write-listeners")]
        self.write_listeners.fire_write(addr, value);
    }

    /// Same as [`Ram::get`] then [`Ram::set`] with a single page lookup,
    /// returns the word stored before the write.
    pub fn get_set(&mut self, addr: Addr, value: Word) -> Word {
        let page = self.pages.get_or_create(page_base(addr, self.pages.page_words()));
        #[cfg(feature = "read-listeners")]
        self.read_listeners.fire_read(addr);
        let old_value = page.get(addr);
        page.set(addr, value);
        #[cfg(feature = "write-listeners")]
        self.write_listeners.fire_write(addr, value);

        old_value
    }

    /// Calls `listener` on each read in `low..=high`, after the listeners
    /// installed before it.
    #[cfg(feature = "read-listeners")]
    pub fn install_read_listener(
        &mut self,
        low: Addr,
        high: Addr,
        listener: impl ReadListener + 'static,
    ) {
        self.read_listeners.install(low, high, Box::new(listener));
        debug!(low, high, count = self.read_listeners.len(), "read listener installed");
    }

    /// Calls `listener` on each write in `low..=high`, after the listeners
    /// installed before it.
    #[cfg(feature = "write-listeners")]
    pub fn install_write_listener(
        &mut self,
        low: Addr,
        high: Addr,
        listener: impl WriteListener + 'static,
    ) {
        self.write_listeners.install(low, high, Box::new(listener));
        debug!(low, high, count = self.write_listeners.len(), "write listener installed");
    }

    pub fn page_count(&self) -> usize {
        self.pages.page_count()
    }

    pub fn page_words(&self) -> u32 {
        self.pages.page_words()
    }
}

impl fmt::Debug for Ram {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "RAM {:?}", self.pages)?;
        #[cfg(feature = "read-listeners")]
        write!(f, ", read listeners = {}", self.read_listeners.len())?;
        #[cfg(feature = "write-listeners")]
        write!(f, ", write listeners = {}", self.write_listeners.len())?;

        Ok(())
    }
}
