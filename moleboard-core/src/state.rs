//! Display state machine
//!
//! Owns the two labels and the splash flag, and maps each decoded
//! [`Command`] onto a display mode, new label text, and scroll behavior.
//! Transitions are synchronous and total; there is no terminal mode.
//!
//! Label texts carry the trailing spaces of the original cabinet firmware:
//! the gap is what separates one pass of a scrolled text from the next.

use heapless::String;

use moleboard_protocol::{Command, Player, Stage};

use crate::label::{Label, Orientation, ScrollDirection, P1_COLOR, P2_COLOR, TEXT_CAP};
use crate::traits::HighscoreStore;

/// P1 label rest anchor (pinned position when not scrolling).
pub const P1_REST: (i32, i32) = (8, -4);

/// P2 label rest anchor.
pub const P2_REST: (i32, i32) = (24, 36);

/// P2 label starting position (one panel-width down the scroll axis).
const P2_START: (i32, i32) = (24, 32);

/// Banner shown from power-on until the controller says otherwise.
const BOOT_BANNER: &str = "Whack A Mole Attack      ";

const PRESS_START: &str = "Press Start      ";
const WAITING: &str = "Waiting          ";

/// How a round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    Win(Player),
    Tie,
}

/// Mutually exclusive display modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// In-game score readout. Also the power-on mode, showing the boot banner.
    Score,
    /// Attract-mode sprite instead of the labels.
    Splash,
    /// Controller handshake seen, waiting for the first real command.
    Handshake,
    PressStart,
    Highscore,
    NewGame,
    Countdown(Stage),
    Waiting(Player),
    RoundOver(Outcome),
    /// Echoing an unrecognized frame.
    Unknown,
}

/// Bytes the transition handler wants written back to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reply {
    /// Answer the `#CONREADY` handshake with `DSPREADY`.
    DisplayReady,
}

/// The single process-wide display state.
///
/// Created once at startup and mutated only by [`DisplayState::apply`] and
/// the scroll engine.
#[derive(Debug, Clone)]
pub struct DisplayState {
    /// Label facing player 1.
    pub p1: Label,
    /// Label facing player 2 (upside-down reading).
    pub p2: Label,
    pub mode: Mode,
    /// Whether the scroll engine moves the labels.
    pub scrolling: bool,
    /// Whether the panel shows the splash sprite instead of the labels.
    pub splash_active: bool,
    /// Running highscore, authoritative for this session.
    pub highscore: u32,
}

impl DisplayState {
    pub fn new(highscore: u32) -> Self {
        Self {
            p1: Label::new(
                BOOT_BANNER,
                P1_REST,
                P1_REST,
                ScrollDirection::Forward,
                Orientation::RightReading,
                P1_COLOR,
            ),
            p2: Label::new(
                BOOT_BANNER,
                P2_START,
                P2_REST,
                ScrollDirection::Reverse,
                Orientation::UpsideDownReading,
                P2_COLOR,
            ),
            mode: Mode::Score,
            scrolling: true,
            splash_active: false,
            highscore,
        }
    }

    /// Apply one decoded command.
    ///
    /// Returns the reply to send back over the transport, if any. Win
    /// commands that beat the highscore persist it through `store`; a failed
    /// save leaves the in-memory value authoritative.
    pub fn apply<S: HighscoreStore>(&mut self, cmd: &Command<'_>, store: &mut S) -> Option<Reply> {
        match cmd {
            Command::ControllerReady => {
                self.splash_active = false;
                self.mode = Mode::Handshake;
                return Some(Reply::DisplayReady);
            }
            Command::ShowSplash => {
                self.scrolling = false;
                self.splash_active = true;
                self.mode = Mode::Splash;
            }
            Command::ShowPressStart => {
                self.scrolling = true;
                self.splash_active = false;
                self.p1.set_text(PRESS_START);
                self.p2.set_text(PRESS_START);
                self.mode = Mode::PressStart;
            }
            Command::ShowHighscore => {
                self.scrolling = true;
                self.splash_active = false;
                self.p1
                    .set_text_fmt(format_args!("Highscore: {}      ", self.highscore));
                self.p2
                    .set_text_fmt(format_args!("Highscore: {}      ", self.highscore));
                self.mode = Mode::Highscore;
            }
            Command::NewGame => {
                self.scrolling = true;
                self.splash_active = false;
                self.p1.set_text("New Game       ");
                self.p2.set_text("New Game       ");
                self.mode = Mode::NewGame;
            }
            Command::RoundReady(stage) => {
                self.scrolling = false;
                // Padding differs per side in the original cabinet; kept as-is
                let (p1_text, p2_text) = match stage {
                    Stage::Ready => (" READY ", " READY "),
                    Stage::Set => ("  SET ", "  SET  "),
                    Stage::Go => ("  GO! ", "  GO!  "),
                };
                self.p1.set_text(p1_text);
                self.p2.set_text(p2_text);
                self.mode = Mode::Countdown(*stage);
            }
            Command::PlayerWaiting(player) => {
                self.scrolling = true;
                self.splash_active = false;
                // Only the opposite side's label changes; the waiting
                // player's own label keeps its previous text.
                match player {
                    Player::P2 => self.p1.set_text(WAITING),
                    Player::P1 => self.p2.set_text(WAITING),
                }
                self.mode = Mode::Waiting(*player);
            }
            Command::PlayerWin { player, score } => {
                self.scrolling = true;
                let mut text: String<TEXT_CAP> = String::new();
                if *score > self.highscore {
                    self.highscore = *score;
                    store.save(*score);
                    let _ = write_fmt(&mut text, format_args!("WINNER! NEW HIGHSCORE! {}     ", score));
                } else {
                    let _ = write_fmt(&mut text, format_args!("YOU WIN {}      ", score));
                }
                match player {
                    Player::P1 => {
                        self.p1.set_text(&text);
                        self.p2.set_text(PRESS_START);
                    }
                    Player::P2 => {
                        self.p2.set_text(&text);
                        self.p1.set_text(PRESS_START);
                    }
                }
                self.mode = Mode::RoundOver(Outcome::Win(*player));
            }
            Command::TieGame { score } => {
                self.scrolling = true;
                self.p1
                    .set_text_fmt(format_args!("TIE GAME {}      ", score));
                self.p2
                    .set_text_fmt(format_args!("TIE GAME {}      ", score));
                self.mode = Mode::RoundOver(Outcome::Tie);
            }
            Command::ScoreUpdate { p1, p2, .. } => {
                self.scrolling = false;
                self.p1.set_text_fmt(format_args!("{:>6}", p1));
                self.p2.set_text_fmt(format_args!("{:>6}", p2));
                self.mode = Mode::Score;
            }
            Command::Unknown(raw) => {
                self.scrolling = true;
                let text = unknown_text(raw);
                self.p1.set_text(&text);
                self.p2.set_text(&text);
                self.mode = Mode::Unknown;
            }
        }
        None
    }
}

/// Render an unrecognized frame as label text.
///
/// Non-printable bytes become `?` so arbitrary garbage stays displayable.
fn unknown_text(raw: &[u8]) -> String<TEXT_CAP> {
    let mut text: String<TEXT_CAP> = String::new();
    let _ = text.push_str("unknown: ");
    for &b in raw {
        let ch = if (0x20..0x7f).contains(&b) {
            b as char
        } else {
            '?'
        };
        if text.push(ch).is_err() {
            break;
        }
    }
    let _ = text.push_str("     ");
    text
}

fn write_fmt(s: &mut String<TEXT_CAP>, args: core::fmt::Arguments<'_>) -> core::fmt::Result {
    use core::fmt::Write;
    s.write_fmt(args)
}
