use super::*;
use std::path::Path;

/*
 * ROM
 * initialized once and never modified. Its content has to fit in the host
 * memory anyway, so a plain buffer does the job.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rom {
    rom: Box<[Word]>,
}

impl Rom {
    pub fn new(data: &[Word]) -> Rom {
        Rom { rom: data.into() }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Rom, MemoryError> {
        load_words(path).map(Rom::from)
    }

    /// Same as [`Rom::load`] but a failure terminates the process.
    pub fn from_file(path: impl AsRef<Path>) -> Rom {
        Rom::load(path).unwrap_or_else(|e| fatal(&e))
    }

    /// Panics when `addr` is past the end of the ROM.
    pub fn get(&self, addr: Addr) -> Word {
        self.rom[addr as usize]
    }

    pub fn len(&self) -> usize {
        self.rom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rom.is_empty()
    }

    pub fn as_slice(&self) -> &[Word] {
        &self.rom
    }
}

impl From<Vec<Word>> for Rom {
    fn from(data: Vec<Word>) -> Rom {
        Rom {
            rom: data.into_boxed_slice(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rom_copies_data() {
        let mut data = vec![1, 2, 3];
        let rom = Rom::new(&data);
        data[0] = 0xff;
        assert_eq!(1, rom.get(0));
        assert_eq!(3, rom.len());
        assert_eq!(&[1, 2, 3], rom.as_slice());
    }

    #[test]
    #[should_panic]
    fn test_read_past_end() {
        let rom = Rom::from(vec![1, 2]);
        rom.get(2);
    }
}
