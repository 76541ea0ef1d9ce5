use crossterm::event::KeyEvent;

#[derive(Clone, Debug)]
pub enum AppMsg {
    Key(KeyEvent),

    // Mouse, in terminal cell coordinates
    Click { column: u16, row: u16 },
    Hover { column: u16, row: u16 },

    // Picker results
    HotspotPicked(u32, u32),

    // General
    LogMessage(String),
}
