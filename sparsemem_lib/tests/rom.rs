use sparsemem_lib::{MemoryError, Ram, Rom, Word};
use std::env;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn image_file(words: &[Word]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for word in words {
        file.write_all(&word.to_ne_bytes()).unwrap();
    }
    file.flush().unwrap();

    file
}

#[test]
fn rom_create() {
    let data: [Word; 8] = [0xab, 0xbc, 0xcd, 0xde, 0x12, 0x23, 0x34, 0x45];
    let rom = Rom::new(&data);

    assert_eq!(8, rom.len());
    for (index, word) in data.iter().enumerate() {
        assert_eq!(*word, rom.get(index as u32));
    }
}

#[test]
fn rom_from_file() {
    let file = image_file(&[0xdead_beef, 0x0bad_f00d, 7]);
    let rom = Rom::from_file(file.path());

    assert_eq!(&[0xdead_beef, 0x0bad_f00d, 7], rom.as_slice());
}

#[test]
fn ram_from_file() {
    let data: Vec<Word> = (0..3000).map(|n| n * 3).collect();
    let file = image_file(&data);
    let mut ram = Ram::from_file(file.path());

    // 3000 words use the first three pages
    assert_eq!(3, ram.page_count());
    for (addr, word) in data.iter().enumerate() {
        assert_eq!(*word, ram.get(addr as u32));
    }
    assert_eq!(0, ram.get(3000));
}

#[test]
fn load_rejects_partial_word() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&[0x01, 0x02, 0x03, 0x04, 0x05, 0x06]).unwrap();
    file.flush().unwrap();

    match Rom::load(file.path()) {
        Err(MemoryError::Misaligned { len, .. }) => assert_eq!(6, len),
        v => panic!("it should return a misaligned error, got {:?}", v),
    }
    assert!(Ram::load(file.path()).is_err());
}

// Set in the child process running the failing load.
const FATAL_LOAD_PATH: &str = "SPARSEMEM_FATAL_LOAD_PATH";

#[test]
fn from_file_failure_aborts() {
    if let Some(path) = env::var_os(FATAL_LOAD_PATH) {
        Ram::from_file(path);
        unreachable!("loading a missing file should have aborted");
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.bin");
    let output = Command::new(env::current_exe().unwrap())
        .args(["from_file_failure_aborts", "--exact", "--nocapture", "--test-threads=1"])
        .env(FATAL_LOAD_PATH, &path)
        .output()
        .unwrap();

    assert!(!output.status.success());
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        assert_eq!(Some(libc::SIGABRT), output.status.signal());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains(&format!("error: failed to read file '{}'", path.display())),
        "unexpected error output: {}",
        stderr
    );
}
