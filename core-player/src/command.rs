//! # Player Commands
//!
//! The closed set of operations the facade can issue against the widget,
//! together with their typed arguments.
//!
//! The widget's control surface is modelled as a fixed enumeration rather
//! than a runtime name list: [`Operation`] is the fieldless key used for
//! policy lookup and logging, and [`Command`] carries each operation's
//! arguments. Every facade method funnels into a `Command` before dispatch,
//! so the widget seam ([`crate::handle::PlayerHandle`]) stays closed over
//! this enum.

use std::fmt;

// ============================================================================
// Operation Names
// ============================================================================

/// Fieldless identifier for every supported widget operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CueById,
    LoadById,
    CueByUrl,
    LoadByUrl,
    CuePlaylist,
    LoadPlaylist,
    Play,
    Pause,
    Stop,
    SeekTo,
    NextTrack,
    PreviousTrack,
    PlayTrackAt,
    Mute,
    Unmute,
    IsMuted,
    SetVolume,
    GetVolume,
    SetPlaybackRate,
    GetPlaybackRate,
    GetAvailablePlaybackRates,
    SetLoop,
    SetShuffle,
    GetPlaylist,
    GetPlaylistIndex,
    GetState,
    GetCurrentTime,
    GetDuration,
    GetMediaUrl,
    GetEmbedCode,
    GetLoadedFraction,
    GetPlaybackQuality,
    SetPlaybackQuality,
    GetAvailableQualityLevels,
    SetSize,
    Destroy,
}

impl Operation {
    /// Every supported operation.
    pub const ALL: &'static [Operation] = &[
        Operation::CueById,
        Operation::LoadById,
        Operation::CueByUrl,
        Operation::LoadByUrl,
        Operation::CuePlaylist,
        Operation::LoadPlaylist,
        Operation::Play,
        Operation::Pause,
        Operation::Stop,
        Operation::SeekTo,
        Operation::NextTrack,
        Operation::PreviousTrack,
        Operation::PlayTrackAt,
        Operation::Mute,
        Operation::Unmute,
        Operation::IsMuted,
        Operation::SetVolume,
        Operation::GetVolume,
        Operation::SetPlaybackRate,
        Operation::GetPlaybackRate,
        Operation::GetAvailablePlaybackRates,
        Operation::SetLoop,
        Operation::SetShuffle,
        Operation::GetPlaylist,
        Operation::GetPlaylistIndex,
        Operation::GetState,
        Operation::GetCurrentTime,
        Operation::GetDuration,
        Operation::GetMediaUrl,
        Operation::GetEmbedCode,
        Operation::GetLoadedFraction,
        Operation::GetPlaybackQuality,
        Operation::SetPlaybackQuality,
        Operation::GetAvailableQualityLevels,
        Operation::SetSize,
        Operation::Destroy,
    ];

    /// The operation's wire name on the widget's control surface.
    pub fn name(self) -> &'static str {
        match self {
            Operation::CueById => "cueById",
            Operation::LoadById => "loadById",
            Operation::CueByUrl => "cueByUrl",
            Operation::LoadByUrl => "loadByUrl",
            Operation::CuePlaylist => "cuePlaylist",
            Operation::LoadPlaylist => "loadPlaylist",
            Operation::Play => "play",
            Operation::Pause => "pause",
            Operation::Stop => "stop",
            Operation::SeekTo => "seekTo",
            Operation::NextTrack => "nextTrack",
            Operation::PreviousTrack => "previousTrack",
            Operation::PlayTrackAt => "playTrackAt",
            Operation::Mute => "mute",
            Operation::Unmute => "unmute",
            Operation::IsMuted => "isMuted",
            Operation::SetVolume => "setVolume",
            Operation::GetVolume => "getVolume",
            Operation::SetPlaybackRate => "setPlaybackRate",
            Operation::GetPlaybackRate => "getPlaybackRate",
            Operation::GetAvailablePlaybackRates => "getAvailablePlaybackRates",
            Operation::SetLoop => "setLoop",
            Operation::SetShuffle => "setShuffle",
            Operation::GetPlaylist => "getPlaylist",
            Operation::GetPlaylistIndex => "getPlaylistIndex",
            Operation::GetState => "getState",
            Operation::GetCurrentTime => "getCurrentTime",
            Operation::GetDuration => "getDuration",
            Operation::GetMediaUrl => "getMediaUrl",
            Operation::GetEmbedCode => "getEmbedCode",
            Operation::GetLoadedFraction => "getLoadedFraction",
            Operation::GetPlaybackQuality => "getPlaybackQuality",
            Operation::SetPlaybackQuality => "setPlaybackQuality",
            Operation::GetAvailableQualityLevels => "getAvailableQualityLevels",
            Operation::SetSize => "setSize",
            Operation::Destroy => "destroy",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// Commands
// ============================================================================

/// A fully-specified invocation of one widget operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Cue a media item by its identifier without starting playback.
    CueById {
        media_id: String,
        start_seconds: Option<f64>,
    },
    /// Load and play a media item by its identifier.
    LoadById {
        media_id: String,
        start_seconds: Option<f64>,
    },
    /// Cue a media item by URL without starting playback.
    CueByUrl {
        url: String,
        start_seconds: Option<f64>,
    },
    /// Load and play a media item by URL.
    LoadByUrl {
        url: String,
        start_seconds: Option<f64>,
    },
    /// Cue a playlist, optionally starting at `index`.
    CuePlaylist {
        playlist: Vec<String>,
        index: Option<u32>,
    },
    /// Load a playlist and start playback, optionally at `index`.
    LoadPlaylist {
        playlist: Vec<String>,
        index: Option<u32>,
    },
    Play,
    Pause,
    Stop,
    /// Seek to `seconds`; `allow_seek_ahead` permits seeking past the
    /// buffered range.
    SeekTo {
        seconds: f64,
        allow_seek_ahead: bool,
    },
    NextTrack,
    PreviousTrack,
    PlayTrackAt {
        index: u32,
    },
    Mute,
    Unmute,
    IsMuted,
    /// Volume in the 0-100 range.
    SetVolume {
        volume: u8,
    },
    GetVolume,
    SetPlaybackRate {
        rate: f64,
    },
    GetPlaybackRate,
    GetAvailablePlaybackRates,
    SetLoop {
        looping: bool,
    },
    SetShuffle {
        shuffle: bool,
    },
    GetPlaylist,
    GetPlaylistIndex,
    GetState,
    GetCurrentTime,
    GetDuration,
    GetMediaUrl,
    GetEmbedCode,
    GetLoadedFraction,
    GetPlaybackQuality,
    SetPlaybackQuality {
        quality: String,
    },
    GetAvailableQualityLevels,
    SetSize {
        width: u32,
        height: u32,
    },
    Destroy,
}

impl Command {
    /// The operation this command invokes, used for policy lookup.
    pub fn operation(&self) -> Operation {
        match self {
            Command::CueById { .. } => Operation::CueById,
            Command::LoadById { .. } => Operation::LoadById,
            Command::CueByUrl { .. } => Operation::CueByUrl,
            Command::LoadByUrl { .. } => Operation::LoadByUrl,
            Command::CuePlaylist { .. } => Operation::CuePlaylist,
            Command::LoadPlaylist { .. } => Operation::LoadPlaylist,
            Command::Play => Operation::Play,
            Command::Pause => Operation::Pause,
            Command::Stop => Operation::Stop,
            Command::SeekTo { .. } => Operation::SeekTo,
            Command::NextTrack => Operation::NextTrack,
            Command::PreviousTrack => Operation::PreviousTrack,
            Command::PlayTrackAt { .. } => Operation::PlayTrackAt,
            Command::Mute => Operation::Mute,
            Command::Unmute => Operation::Unmute,
            Command::IsMuted => Operation::IsMuted,
            Command::SetVolume { .. } => Operation::SetVolume,
            Command::GetVolume => Operation::GetVolume,
            Command::SetPlaybackRate { .. } => Operation::SetPlaybackRate,
            Command::GetPlaybackRate => Operation::GetPlaybackRate,
            Command::GetAvailablePlaybackRates => Operation::GetAvailablePlaybackRates,
            Command::SetLoop { .. } => Operation::SetLoop,
            Command::SetShuffle { .. } => Operation::SetShuffle,
            Command::GetPlaylist => Operation::GetPlaylist,
            Command::GetPlaylistIndex => Operation::GetPlaylistIndex,
            Command::GetState => Operation::GetState,
            Command::GetCurrentTime => Operation::GetCurrentTime,
            Command::GetDuration => Operation::GetDuration,
            Command::GetMediaUrl => Operation::GetMediaUrl,
            Command::GetEmbedCode => Operation::GetEmbedCode,
            Command::GetLoadedFraction => Operation::GetLoadedFraction,
            Command::GetPlaybackQuality => Operation::GetPlaybackQuality,
            Command::SetPlaybackQuality { .. } => Operation::SetPlaybackQuality,
            Command::GetAvailableQualityLevels => Operation::GetAvailableQualityLevels,
            Command::SetSize { .. } => Operation::SetSize,
            Command::Destroy => Operation::Destroy,
        }
    }
}
