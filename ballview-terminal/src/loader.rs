/// Background asset loading with progress reporting
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use ballview_core::{asset, Mesh};

const CHUNK_SIZE: usize = 64 * 1024;

/// Events delivered by the loader thread, drained by the frame loop
pub enum LoadEvent {
    Progress { loaded: u64, total: u64 },
    Loaded(Mesh),
    Failed(String),
}

/// Kick off the one asynchronous load for this run.
///
/// The returned channel yields progress events while the file is read,
/// then exactly one terminal `Loaded` or `Failed` event.
pub fn spawn(path: PathBuf) -> Receiver<LoadEvent> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || load(path, &tx));
    rx
}

fn load(path: PathBuf, tx: &Sender<LoadEvent>) {
    // Send failures best-effort; the app may already have quit
    if let Err(reason) = read_with_progress(&path, tx) {
        let _ = tx.send(LoadEvent::Failed(reason));
        return;
    }

    match asset::load_mesh(&path) {
        Ok(mesh) => {
            let _ = tx.send(LoadEvent::Loaded(mesh));
        }
        Err(err) => {
            let _ = tx.send(LoadEvent::Failed(err.to_string()));
        }
    }
}

/// Stream the file once to drive the progress indicator.
/// The actual import re-reads through the glTF crate afterwards.
fn read_with_progress(path: &PathBuf, tx: &Sender<LoadEvent>) -> Result<(), String> {
    let mut file = File::open(path).map_err(|e| e.to_string())?;
    let total = file.metadata().map_err(|e| e.to_string())?.len();

    let mut buffer = vec![0u8; CHUNK_SIZE];
    let mut loaded = 0u64;
    loop {
        let n = file.read(&mut buffer).map_err(|e| e.to_string())?;
        if n == 0 {
            break;
        }
        loaded += n as u64;
        let _ = tx.send(LoadEvent::Progress { loaded, total });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn collect(rx: Receiver<LoadEvent>) -> Vec<LoadEvent> {
        rx.iter().collect()
    }

    #[test]
    fn test_missing_file_fails() {
        let events = collect(spawn(PathBuf::from("no/such/model.gltf")));
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], LoadEvent::Failed(_)));
    }

    #[test]
    fn test_unparseable_file_reports_progress_then_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("junk.gltf");
        let mut file = File::create(&path).unwrap();
        file.write_all(&[0xabu8; 1000]).unwrap();
        drop(file);

        let events = collect(spawn(path));
        assert!(events.len() >= 2);

        let mut last_loaded = 0;
        for event in &events[..events.len() - 1] {
            match event {
                LoadEvent::Progress { loaded, total } => {
                    assert_eq!(*total, 1000);
                    assert!(*loaded > last_loaded);
                    last_loaded = *loaded;
                }
                _ => panic!("expected only progress before the terminal event"),
            }
        }
        assert_eq!(last_loaded, 1000);
        assert!(matches!(events.last(), Some(LoadEvent::Failed(_))));
    }
}
