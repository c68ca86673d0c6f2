//! Line-oriented command surface.
//!
//! | Command | Effect |
//! |---------|--------|
//! | `SET_DEADLINE <tick>` | Set the admission deadline |
//! | `SUBMIT <id> <cost> <arrival>` | Admit a submission |
//! | `PROCESS` | Run one dispatch cycle |
//! | `STATUS` | Clock and tier sizes |
//! | `TICK <delta>` | Advance the clock |
//! | `STATS` | Running statistics |
//! | `EXIT` | End the session |

mod parser;
mod session;

pub use parser::{parse, Command};
pub use session::{Outcome, Session, BANNER, PROMPT};
