//! Command decoding
//!
//! One protocol frame decodes to exactly one [`Command`]. Recognition order:
//! the score-update pattern first, then the literal prefix table, then
//! [`Command::Unknown`] carrying the raw frame. Decoding never fails; a
//! recognized prefix with a malformed numeric payload degrades to `Unknown`
//! rather than propagating a parse error.

/// Which side of the cabinet a command refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Player {
    P1,
    P2,
}

/// Round countdown stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stage {
    Ready,
    Set,
    Go,
}

/// A decoded controller command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command<'a> {
    /// `#CONREADY` handshake; the display must answer `DSPREADY`.
    ControllerReady,
    /// `#SHOWSPLASH` - enter attract mode.
    ShowSplash,
    /// `#SHOWPRESSSTART` - prompt both players to start.
    ShowPressStart,
    /// `#SHOWHIGHSCORE` - show the stored highscore.
    ShowHighscore,
    /// `#NEWGAME` - new game banner.
    NewGame,
    /// `#GAMEREADY:READY|SET|GO` - round countdown.
    RoundReady(Stage),
    /// `#ISP1READY` / `#ISP2READY` - one player is waiting on the other.
    PlayerWaiting(Player),
    /// `#PLAYER1WIN:<score>` / `#PLAYER2WIN:<score>`.
    PlayerWin { player: Player, score: u32 },
    /// `#TIEGAME:<score>`.
    TieGame { score: u32 },
    /// `#p1:<a>#p2:<b>#loop:<c>` - in-game score update.
    ScoreUpdate { p1: u32, p2: u32, loop_count: u32 },
    /// Anything else, kept verbatim for on-panel display.
    Unknown(&'a [u8]),
}

impl<'a> Command<'a> {
    /// Decode a single frame.
    pub fn decode(frame: &'a [u8]) -> Self {
        if let Some((p1, p2, loop_count)) = parse_score_update(frame) {
            return Command::ScoreUpdate { p1, p2, loop_count };
        }

        if frame.starts_with(b"#CONREADY") {
            Command::ControllerReady
        } else if frame.starts_with(b"#SHOWSPLASH") {
            Command::ShowSplash
        } else if frame.starts_with(b"#SHOWPRESSSTART") {
            Command::ShowPressStart
        } else if frame.starts_with(b"#SHOWHIGHSCORE") {
            Command::ShowHighscore
        } else if frame.starts_with(b"#NEWGAME") {
            Command::NewGame
        } else if frame.starts_with(b"#GAMEREADY:READY") {
            Command::RoundReady(Stage::Ready)
        } else if frame.starts_with(b"#GAMEREADY:SET") {
            Command::RoundReady(Stage::Set)
        } else if frame.starts_with(b"#GAMEREADY:GO") {
            Command::RoundReady(Stage::Go)
        } else if frame.starts_with(b"#ISP2READY") {
            Command::PlayerWaiting(Player::P2)
        } else if frame.starts_with(b"#ISP1READY") {
            Command::PlayerWaiting(Player::P1)
        } else if let Some(rest) = frame.strip_prefix(b"#PLAYER1WIN".as_slice()) {
            match parse_colon_score(rest) {
                Some(score) => Command::PlayerWin {
                    player: Player::P1,
                    score,
                },
                None => Command::Unknown(frame),
            }
        } else if let Some(rest) = frame.strip_prefix(b"#PLAYER2WIN".as_slice()) {
            match parse_colon_score(rest) {
                Some(score) => Command::PlayerWin {
                    player: Player::P2,
                    score,
                },
                None => Command::Unknown(frame),
            }
        } else if let Some(rest) = frame.strip_prefix(b"#TIEGAME".as_slice()) {
            match parse_colon_score(rest) {
                Some(score) => Command::TieGame { score },
                None => Command::Unknown(frame),
            }
        } else {
            Command::Unknown(frame)
        }
    }
}

/// Parse `#p1:<digits>#p2:<digits>#loop:<digits>` from the start of a frame.
fn parse_score_update(frame: &[u8]) -> Option<(u32, u32, u32)> {
    let rest = frame.strip_prefix(b"#p1:".as_slice())?;
    let (p1, rest) = take_digits(rest)?;
    let rest = rest.strip_prefix(b"#p2:".as_slice())?;
    let (p2, rest) = take_digits(rest)?;
    let rest = rest.strip_prefix(b"#loop:".as_slice())?;
    let (loop_count, _) = take_digits(rest)?;
    Some((p1, p2, loop_count))
}

/// Parse a `:<digits>` suffix, as carried by win and tie commands.
fn parse_colon_score(rest: &[u8]) -> Option<u32> {
    let digits = rest.strip_prefix(b":".as_slice())?;
    let (score, rest) = take_digits(digits)?;
    rest.is_empty().then_some(score)
}

/// Consume a run of ASCII digits, returning the value and the remainder.
///
/// Fails on an empty run or on u32 overflow.
fn take_digits(bytes: &[u8]) -> Option<(u32, &[u8])> {
    let end = bytes
        .iter()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(bytes.len());
    if end == 0 {
        return None;
    }
    let mut value: u32 = 0;
    for &b in &bytes[..end] {
        value = value.checked_mul(10)?.checked_add(u32::from(b - b'0'))?;
    }
    Some((value, &bytes[end..]))
}
