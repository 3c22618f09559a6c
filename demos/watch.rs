//! Digital-watch demo.
//!
//! A scripted rendition of a two-mode digital watch: a show-time mode
//! and a set-time mode, both nested inside a root mode that handles the
//! quit keys. The script below stands in for a key-reading event loop;
//! the outer loop polls the current leaf to know when the watch is done.
//!
//! Run with `cargo run --example watch`.

use arbor::builder::{BuildError, Registrar};
use arbor::core::StateId;
use arbor::machine::{EventOutcome, FsmDescription, Machine, State, StateContext};
use arbor::state_id_enum;

state_id_enum! {
    enum WatchId {
        Root,
        ShowTime,
        SetTime,
        End,
    }
}

#[derive(Clone, Debug)]
enum Key {
    Tick,
    Up,
    Down,
    Left,
    Right,
    Char(char),
}

/// Digit groups the set-mode cursor can sit on. Position 0 is the mode
/// column; moving right past the seconds commits the edit.
const CURSOR_MAX: usize = 3;

struct WatchData {
    hour: u8,
    min: u8,
    sec: u8,
    cursor: usize,
    frames: Vec<String>,
}

impl WatchData {
    fn new(hour: u8, min: u8, sec: u8) -> Self {
        Self {
            hour,
            min,
            sec,
            cursor: 0,
            frames: Vec::new(),
        }
    }

    fn advance_second(&mut self) {
        self.sec = (self.sec + 1) % 60;
        if self.sec == 0 {
            self.min = (self.min + 1) % 60;
            if self.min == 0 {
                self.hour = (self.hour + 1) % 24;
            }
        }
    }
}

struct Watch;

impl FsmDescription for Watch {
    type Id = WatchId;
    type Event = Key;
    type Data = WatchData;

    fn setup(reg: &mut Registrar<Self>) -> Result<(), BuildError> {
        reg.add_state(WatchId::Root, |ctx| Ok(RootMode { ctx }))?;
        reg.add_substate(WatchId::ShowTime, WatchId::Root, |ctx| Ok(ShowMode { ctx }))?;
        reg.add_substate(WatchId::SetTime, WatchId::Root, SetMode::enter)?;
        reg.add_state(WatchId::End, |ctx| Ok(EndMode { _ctx: ctx }))?;
        Ok(())
    }
}

struct RootMode {
    ctx: StateContext<Watch>,
}

impl State<Watch> for RootMode {
    fn event(&mut self, ev: &Key) -> EventOutcome {
        match ev {
            Key::Left if self.ctx.data().cursor == 0 => {
                let _ = self.ctx.transition(WatchId::End);
            }
            Key::Char('x') => {
                let _ = self.ctx.transition(WatchId::End);
            }
            _ => {}
        }
        EventOutcome::Propagate
    }
}

struct ShowMode {
    ctx: StateContext<Watch>,
}

impl State<Watch> for ShowMode {
    fn event(&mut self, ev: &Key) -> EventOutcome {
        match ev {
            Key::Tick => {
                let mut data = self.ctx.data_mut();
                data.advance_second();
                let frame = format!("ti {:02}:{:02}:{:02}", data.hour, data.min, data.sec);
                data.frames.push(frame);
                EventOutcome::Consumed
            }
            Key::Up | Key::Down => {
                let _ = self.ctx.transition(WatchId::SetTime);
                EventOutcome::Consumed
            }
            _ => EventOutcome::Propagate,
        }
    }
}

/// Set mode stages the digits locally; the shared clock is only touched
/// when the edit is committed.
struct SetMode {
    ctx: StateContext<Watch>,
    hour: u8,
    min: u8,
    sec: u8,
}

impl SetMode {
    fn enter(ctx: StateContext<Watch>) -> Result<Self, arbor::FsmError> {
        let (hour, min, sec) = {
            let data = ctx.data();
            (data.hour, data.min, data.sec)
        };
        Ok(Self {
            ctx,
            hour,
            min,
            sec,
        })
    }

    fn adjust(&mut self, up: bool) {
        let cursor = self.ctx.data().cursor;
        let (field, modulus) = match cursor {
            1 => (&mut self.hour, 24),
            2 => (&mut self.min, 60),
            _ => (&mut self.sec, 60),
        };
        *field = if up {
            (*field + 1) % modulus
        } else {
            (*field + modulus - 1) % modulus
        };
    }
}

impl State<Watch> for SetMode {
    fn event(&mut self, ev: &Key) -> EventOutcome {
        match ev {
            Key::Tick => {
                let frame = format!("st {:02}:{:02}:{:02}", self.hour, self.min, self.sec);
                self.ctx.data_mut().frames.push(frame);
                EventOutcome::Consumed
            }
            Key::Left => {
                let mut data = self.ctx.data_mut();
                data.cursor = data.cursor.saturating_sub(1);
                EventOutcome::Consumed
            }
            Key::Right => {
                let committed = {
                    let mut data = self.ctx.data_mut();
                    if data.cursor < CURSOR_MAX {
                        data.cursor += 1;
                        false
                    } else {
                        data.cursor = 0;
                        data.hour = self.hour;
                        data.min = self.min;
                        data.sec = self.sec;
                        true
                    }
                };
                if committed {
                    let _ = self.ctx.transition(WatchId::ShowTime);
                }
                EventOutcome::Consumed
            }
            Key::Up | Key::Down => {
                if self.ctx.data().cursor == 0 {
                    let _ = self.ctx.transition(WatchId::ShowTime);
                } else {
                    self.adjust(matches!(ev, Key::Up));
                }
                EventOutcome::Consumed
            }
            _ => EventOutcome::Propagate,
        }
    }
}

struct EndMode {
    _ctx: StateContext<Watch>,
}

impl State<Watch> for EndMode {
    fn event(&mut self, _ev: &Key) -> EventOutcome {
        EventOutcome::Propagate
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut watch = Machine::<Watch>::new(WatchData::new(9, 59, 58))?;
    watch.set_start(WatchId::ShowTime)?;

    // A canned session: watch the clock roll over, edit the time in set
    // mode (hour up, minute down, wander the cursor), commit, then quit.
    let script = [
        Key::Tick,
        Key::Tick,
        Key::Tick,
        Key::Up,
        Key::Tick,
        Key::Right,
        Key::Up,
        Key::Right,
        Key::Down,
        Key::Left,
        Key::Right,
        Key::Tick,
        Key::Right,
        Key::Right,
        Key::Tick,
        Key::Char('x'),
    ];

    for key in script {
        if watch.current_leaf_id()? == WatchId::End {
            break;
        }
        watch.post(key)?;
    }

    for frame in watch.data().frames.iter() {
        println!("{frame}");
    }
    println!("-- {}", watch.current_leaf_id()?.label());

    Ok(())
}
