//! Render loop driver
//!
//! The top-level cooperative loop. One [`Driver::tick`] is one render frame:
//! present the current scene, poll the transport, apply any decoded
//! commands, advance the scroll cadence, present again. The loop never
//! terminates and nothing in it blocks; a frame with no serial traffic is
//! just an animation frame.

use moleboard_protocol::{frames, Command, DISPLAY_READY, READ_CHUNK};

use crate::scroll::ScrollEngine;
use crate::splash::SplashAnimation;
use crate::state::{DisplayState, Reply};
use crate::traits::{HighscoreStore, PanelSurface, Scene, SerialLink};

/// Owns the display state and the three hardware seams.
pub struct Driver<P, L, S>
where
    P: PanelSurface,
    L: SerialLink,
    S: HighscoreStore,
{
    panel: P,
    link: L,
    store: S,
    state: DisplayState,
    scroll: ScrollEngine,
    splash: SplashAnimation,
}

impl<P, L, S> Driver<P, L, S>
where
    P: PanelSurface,
    L: SerialLink,
    S: HighscoreStore,
{
    /// Load the highscore and set up the boot-banner display state.
    pub fn new(panel: P, link: L, mut store: S) -> Self {
        let highscore = store.load();
        Self {
            panel,
            link,
            store,
            state: DisplayState::new(highscore),
            scroll: ScrollEngine::new(),
            splash: SplashAnimation::new(),
        }
    }

    /// Current display state, for inspection.
    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// Run one frame of the loop.
    pub fn tick(&mut self) {
        if self.state.splash_active {
            self.splash.update();
        }
        self.present();

        let mut buf = [0u8; READ_CHUNK];
        let n = self.link.read(&mut buf);
        if n > 0 {
            for frame in frames(&buf[..n]) {
                let cmd = Command::decode(frame);
                if let Some(Reply::DisplayReady) = self.state.apply(&cmd, &mut self.store) {
                    self.link.write(DISPLAY_READY);
                }
            }
        }

        let (width, _) = self.panel.dimensions();
        self.scroll.tick(&mut self.state, width);

        self.present();
    }

    fn present(&mut self) {
        let scene = if self.state.splash_active {
            Scene::Splash { x: self.splash.x }
        } else {
            Scene::Labels {
                p1: &self.state.p1,
                p2: &self.state.p2,
            }
        };
        let _ = self.panel.present(scene);
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec::Vec;

    use super::*;
    use crate::state::Mode;
    use crate::traits::SurfaceError;

    /// Panel fake that records what was presented.
    struct FakePanel {
        presents: usize,
        splash_frames: Vec<i32>,
    }

    impl FakePanel {
        fn new() -> Self {
            Self {
                presents: 0,
                splash_frames: Vec::new(),
            }
        }
    }

    impl PanelSurface for FakePanel {
        fn dimensions(&self) -> (i32, i32) {
            (32, 32)
        }

        fn present(&mut self, scene: Scene<'_>) -> Result<(), SurfaceError> {
            self.presents += 1;
            if let Scene::Splash { x } = scene {
                self.splash_frames.push(x);
            }
            Ok(())
        }
    }

    /// Link fake: queued inbound chunks, captured outbound bytes.
    struct FakeLink {
        inbound: Vec<Vec<u8>>,
        outbound: Vec<u8>,
    }

    impl FakeLink {
        fn new() -> Self {
            Self {
                inbound: Vec::new(),
                outbound: Vec::new(),
            }
        }

        fn queue(&mut self, chunk: &[u8]) {
            self.inbound.push(chunk.to_vec());
        }
    }

    impl SerialLink for FakeLink {
        fn read(&mut self, buf: &mut [u8]) -> usize {
            if self.inbound.is_empty() {
                return 0;
            }
            let chunk = self.inbound.remove(0);
            let n = chunk.len().min(buf.len());
            buf[..n].copy_from_slice(&chunk[..n]);
            n
        }

        fn write(&mut self, bytes: &[u8]) {
            self.outbound.extend_from_slice(bytes);
        }
    }

    struct FakeStore {
        value: u32,
        saves: Vec<u32>,
    }

    impl FakeStore {
        fn new(value: u32) -> Self {
            Self {
                value,
                saves: Vec::new(),
            }
        }
    }

    impl HighscoreStore for FakeStore {
        fn load(&mut self) -> u32 {
            self.value
        }

        fn save(&mut self, value: u32) {
            self.value = value;
            self.saves.push(value);
        }
    }

    fn driver(highscore: u32) -> Driver<FakePanel, FakeLink, FakeStore> {
        Driver::new(FakePanel::new(), FakeLink::new(), FakeStore::new(highscore))
    }

    #[test]
    fn test_loads_highscore_at_startup() {
        let d = driver(777);
        assert_eq!(d.state().highscore, 777);
    }

    #[test]
    fn test_presents_twice_per_frame() {
        let mut d = driver(0);
        d.tick();
        assert_eq!(d.panel.presents, 2);
        d.tick();
        assert_eq!(d.panel.presents, 4);
    }

    #[test]
    fn test_conready_sends_dspready() {
        let mut d = driver(0);
        d.link.queue(b"#CONREADY\n");
        d.state.splash_active = true;

        d.tick();
        assert_eq!(d.link.outbound.as_slice(), b"DSPREADY");
        assert!(!d.state().splash_active);
    }

    #[test]
    fn test_conready_replies_every_time() {
        // The controller retries the handshake until it hears back
        let mut d = driver(0);
        d.link.queue(b"#CONREADY\n");
        d.link.queue(b"#CONREADY\n");
        d.tick();
        d.tick();
        assert_eq!(d.link.outbound.as_slice(), b"DSPREADYDSPREADY");
    }

    #[test]
    fn test_splash_then_press_start_scenario() {
        let mut d = driver(0);
        d.link.queue(b"#SHOWSPLASH\n");
        d.tick();
        assert!(d.state().splash_active);

        // While active, the sprite is presented instead of the labels
        d.tick();
        d.tick();
        assert_eq!(d.panel.splash_frames.len(), 5);
        assert_eq!(d.panel.splash_frames.last(), Some(&-2));

        d.link.queue(b"#SHOWPRESSSTART\n");
        d.tick();
        assert!(!d.state().splash_active);
        assert!(d.state().scrolling);
        assert_eq!(d.state().p1.text(), "Press Start      ");
        assert_eq!(d.state().p2.text(), "Press Start      ");
    }

    #[test]
    fn test_win_persists_new_highscore() {
        let mut d = driver(100);
        d.link.queue(b"#PLAYER1WIN:150\n");
        d.tick();

        assert_eq!(d.state().highscore, 150);
        assert_eq!(d.store.saves.as_slice(), &[150]);
        assert!(d.state().p1.text().contains("150"));
        assert!(d.state().p1.text().contains("NEW HIGHSCORE"));
    }

    #[test]
    fn test_win_below_highscore_does_not_persist() {
        let mut d = driver(200);
        d.link.queue(b"#PLAYER2WIN:150\n");
        d.tick();

        assert_eq!(d.state().highscore, 200);
        assert!(d.store.saves.is_empty());
        assert_eq!(d.state().p2.text(), "YOU WIN 150      ");
    }

    #[test]
    fn test_garbage_is_echoed_and_loop_continues() {
        let mut d = driver(0);
        d.link.queue(b"#XYZ123");
        d.tick();

        assert!(d.state().p1.text().contains("#XYZ123"));
        assert!(d.state().p2.text().contains("#XYZ123"));
        assert_eq!(d.state().mode, Mode::Unknown);

        // Loop keeps running and the next command still lands
        d.link.queue(b"#NEWGAME\n");
        d.tick();
        assert_eq!(d.state().p1.text(), "New Game       ");
    }

    #[test]
    fn test_score_update_pins_labels() {
        let mut d = driver(0);
        d.link.queue(b"#p1:41#p2:13#loop:900");
        d.tick();

        assert_eq!(d.state().p1.text(), "    41");
        assert_eq!(d.state().p2.text(), "    13");
        assert!(!d.state().scrolling);
        // Pinned to rest anchors by the scroll engine
        assert_eq!((d.state().p1.x, d.state().p1.y), (8, -4));
        assert_eq!((d.state().p2.x, d.state().p2.y), (24, 36));
    }

    #[test]
    fn test_multiple_commands_in_one_chunk() {
        let mut d = driver(0);
        d.link.queue(b"#NEWGAME\n#GAMEREADY:READY\n");
        d.tick();
        assert_eq!(d.state().p1.text(), " READY ");
        assert!(!d.state().scrolling);
    }

    #[test]
    fn test_idle_frames_only_animate() {
        let mut d = driver(0);
        for _ in 0..10 {
            d.tick();
        }
        // No serial traffic: state untouched, still the boot banner
        assert_eq!(d.state().p1.text(), "Whack A Mole Attack      ");
        assert_eq!(d.state().mode, Mode::Score);
    }
}
