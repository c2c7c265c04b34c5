mod controller;
mod external;

pub use controller::{
    AudioPlaybackController, LoadTicket, MediaElement, MediaEvent, PlayOutcome, PlaybackState,
    Track,
};
pub use external::{DEFAULT_PLAYER, ExternalPlayer, PlayerExit, player_args};
