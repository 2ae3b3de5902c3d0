//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter      | Implements | Connects to                              |
//! |--------------|------------|------------------------------------------|
//! | `sim_board`  | Board      | in-memory lines with fault injection     |
//! | `gpio_board` | Board      | `embedded-hal` stateful output pins      |
//! | `log_sink`   | EventSink  | `log` facade                             |
//! | `delay`      | DelayNs    | `std::thread::sleep`                     |

pub mod delay;
pub mod gpio_board;
pub mod log_sink;
pub mod sim_board;
