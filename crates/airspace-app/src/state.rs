//! State shared between the host and the game loop thread.

use std::sync::{mpsc, Arc, Mutex};

use airspace_core::commands::PlayerCommand;
use airspace_core::state::CombatSnapshot;

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the combat engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Channels to a running game loop.
///
/// `snapshots` receives every tick's snapshot in order, so no tick's events
/// are lost to a slow reader.
#[derive(Debug)]
pub struct GameLoopHandle {
    pub commands: mpsc::Sender<GameLoopCommand>,
    pub snapshots: mpsc::Receiver<CombatSnapshot>,
}

impl GameLoopHandle {
    /// Forward a player command. Returns false once the loop has stopped.
    pub fn send(&self, command: PlayerCommand) -> bool {
        self.commands
            .send(GameLoopCommand::PlayerCommand(command))
            .is_ok()
    }

    pub fn shutdown(&self) {
        let _ = self.commands.send(GameLoopCommand::Shutdown);
    }
}

/// Latest snapshot, written by the game loop after every tick.
pub type SharedSnapshot = Arc<Mutex<Option<CombatSnapshot>>>;

pub fn new_shared_snapshot() -> SharedSnapshot {
    Arc::new(Mutex::new(None))
}

/// Clone the latest snapshot, if one has been published.
pub fn latest(shared: &SharedSnapshot) -> Option<CombatSnapshot> {
    shared.lock().ok().and_then(|lock| lock.clone())
}
