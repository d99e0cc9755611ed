//! Sound engine for audio feedback
//!
//! Uses a channel-based architecture to handle rodio's non-Send stream.
//! The engine spawns a dedicated audio thread that owns the playback
//! infrastructure. Cues are synthesized sine tones unless the user drops
//! `success.wav` / `failure.wav` into the configured audio directory.

use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Feedback cue played after a clean cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cue {
    /// Clipboard was cleaned and written back
    Success,
    /// No text was available to clean
    Failure,
}

impl Cue {
    /// Custom sound file name for this cue
    fn file_name(self) -> &'static str {
        match self {
            Cue::Success => "success.wav",
            Cue::Failure => "failure.wav",
        }
    }

    /// Synthesized fallback tone (frequency, duration)
    fn tone(self) -> (f32, Duration) {
        match self {
            Cue::Success => (880.0, Duration::from_millis(120)),
            Cue::Failure => (220.0, Duration::from_millis(180)),
        }
    }
}

/// Commands sent to the audio thread
enum AudioCommand {
    Play(Cue),
}

/// Thread-safe handle to the sound engine
#[derive(Clone)]
pub struct SoundEngine {
    sender: mpsc::Sender<AudioCommand>,
}

impl std::fmt::Debug for SoundEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoundEngine").finish()
    }
}

impl SoundEngine {
    pub fn new(audio_dir: PathBuf) -> anyhow::Result<Self> {
        let (sender, receiver) = mpsc::channel::<AudioCommand>();

        // Spawn dedicated audio thread
        thread::spawn(move || {
            Self::audio_thread(receiver, audio_dir);
        });

        Ok(Self { sender })
    }

    fn audio_thread(receiver: mpsc::Receiver<AudioCommand>, audio_dir: PathBuf) {
        use rodio::OutputStream;

        // Initialize audio output on this thread
        let (stream, stream_handle) = match OutputStream::try_default() {
            Ok(s) => s,
            Err(e) => {
                warn!("🔇 Failed to initialize audio output: {}", e);
                return;
            }
        };

        // Keep stream alive
        let _stream = stream;
        let sink = match rodio::Sink::try_new(&stream_handle) {
            Ok(s) => s,
            Err(e) => {
                warn!("🔇 Failed to create audio sink: {}", e);
                return;
            }
        };

        info!("🔊 Audio thread started");

        while let Ok(AudioCommand::Play(cue)) = receiver.recv() {
            let custom = audio_dir.join(cue.file_name());
            if custom.exists() {
                debug!("🔊 Playing custom cue: {:?}", custom);
                if let Err(e) = Self::play_file(&sink, &custom) {
                    warn!("🔇 Custom cue failed ({}), using tone", e);
                    Self::play_tone(&sink, cue);
                }
            } else {
                Self::play_tone(&sink, cue);
            }
        }

        info!("🔇 Audio thread stopped");
    }

    fn play_file(sink: &rodio::Sink, path: &PathBuf) -> anyhow::Result<()> {
        use rodio::Decoder;
        use std::fs::File;
        use std::io::BufReader;

        let file = File::open(path)?;
        let source = Decoder::new(BufReader::new(file))?;
        sink.append(source);
        Ok(())
    }

    fn play_tone(sink: &rodio::Sink, cue: Cue) {
        use rodio::source::{SineWave, Source};

        let (freq, duration) = cue.tone();
        let source = SineWave::new(freq).take_duration(duration).amplify(0.20);
        sink.append(source);
    }

    /// Queue a feedback cue (non-blocking)
    pub fn play(&self, cue: Cue) -> anyhow::Result<()> {
        self.sender
            .send(AudioCommand::Play(cue))
            .map_err(|e| anyhow::anyhow!("Audio thread disconnected: {}", e))
    }
}
