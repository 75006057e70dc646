use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use slidecap::{
    CaptureError, CaptureResult, DeckPage, Recorder, detect::PRESENT_IMAGES_SCRIPT,
    navigate::ADVANCE_KEY, position::HASH_SCRIPT,
};

/// One scripted slide: the fragment the page reports while it is current, and
/// the image sources inside its present container (`None` = no container).
pub struct FakeSlide {
    pub hash: String,
    pub images: Option<Vec<String>>,
}

impl FakeSlide {
    pub fn still(index: usize) -> Self {
        Self {
            hash: format!("#/{index}"),
            images: Some(vec![format!("http://deck.local/chart-{index}.png")]),
        }
    }

    pub fn animated(index: usize) -> Self {
        Self {
            hash: format!("#/{index}"),
            images: Some(vec![format!("http://deck.local/loop-{index}.gif")]),
        }
    }
}

/// Scripted page double: answers the position and detection scripts for the
/// current slide and clamps ArrowRight at the deck's end.
pub struct FakeDeckPage {
    slides: Vec<FakeSlide>,
    current: Mutex<usize>,
}

impl FakeDeckPage {
    pub fn new(slides: Vec<FakeSlide>) -> Self {
        assert!(!slides.is_empty(), "a deck has at least one slide");
        Self {
            slides,
            current: Mutex::new(0),
        }
    }
}

#[async_trait::async_trait]
impl DeckPage for FakeDeckPage {
    async fn eval(&self, script: &str) -> CaptureResult<serde_json::Value> {
        let slide = &self.slides[*self.current.lock().unwrap()];
        if script == HASH_SCRIPT {
            Ok(serde_json::Value::String(slide.hash.clone()))
        } else if script == PRESENT_IMAGES_SCRIPT {
            match &slide.images {
                None => Ok(serde_json::Value::Null),
                Some(images) => Ok(serde_json::json!(images)),
            }
        } else {
            Err(CaptureError::query(format!("unexpected script: {script}")))
        }
    }

    async fn press_key(&self, key: &str) -> CaptureResult<()> {
        assert_eq!(key, ADVANCE_KEY);
        let mut current = self.current.lock().unwrap();
        if *current + 1 < self.slides.len() {
            *current += 1;
        }
        Ok(())
    }

    async fn screenshot(&self) -> CaptureResult<Vec<u8>> {
        // Opaque bytes: the traversal persists stills without decoding them.
        Ok(b"\x89PNG-fake".to_vec())
    }
}

#[derive(Default)]
struct JournalInner {
    starts: Vec<PathBuf>,
    stops: u64,
    active: bool,
}

/// Shared view into a [`FakeRecorder`]'s start/stop history.
#[derive(Clone, Default)]
pub struct RecorderJournal(Arc<Mutex<JournalInner>>);

impl RecorderJournal {
    pub fn starts(&self) -> Vec<PathBuf> {
        self.0.lock().unwrap().starts.clone()
    }

    pub fn stops(&self) -> u64 {
        self.0.lock().unwrap().stops
    }
}

/// Recorder double that journals start/stop pairs and enforces their pairing.
#[derive(Default)]
pub struct FakeRecorder {
    journal: RecorderJournal,
}

impl FakeRecorder {
    pub fn journal(&self) -> RecorderJournal {
        self.journal.clone()
    }
}

#[async_trait::async_trait]
impl Recorder for FakeRecorder {
    async fn start(&mut self, dest: &Path) -> CaptureResult<()> {
        let mut inner = self.journal.0.lock().unwrap();
        assert!(!inner.active, "start while a recording is in progress");
        inner.active = true;
        inner.starts.push(dest.to_path_buf());
        Ok(())
    }

    async fn stop(&mut self) -> CaptureResult<()> {
        let mut inner = self.journal.0.lock().unwrap();
        assert!(inner.active, "stop without a matching start");
        inner.active = false;
        inner.stops += 1;
        Ok(())
    }
}
