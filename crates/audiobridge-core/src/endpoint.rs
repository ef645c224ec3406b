use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaAction {
    Play,
    Pause,
    Stop,
    Next,
    Previous,
    PlayPause,
}

impl MediaAction {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaAction::Play => "play",
            MediaAction::Pause => "pause",
            MediaAction::Stop => "stop",
            MediaAction::Next => "next",
            MediaAction::Previous => "previous",
            MediaAction::PlayPause => "play_pause",
        }
    }
}

/// Every remote operation the bridge exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BridgeEndpoint {
    Status,
    MediaInfo,
    MediaState,
    SetVolume,
    SetMute,
    Media(MediaAction),
    Seek,
    SetShuffle,
    SetRepeat,
    AudioDevices,
    OutputDevice,
    SetOutputDevice,
    InputDevice,
    SetInputDevice,
}

impl BridgeEndpoint {
    pub fn path(self) -> &'static str {
        match self {
            BridgeEndpoint::Status => "/api/status",
            BridgeEndpoint::MediaInfo => "/api/media/info",
            BridgeEndpoint::MediaState => "/api/media/state",
            BridgeEndpoint::SetVolume => "/api/volume",
            BridgeEndpoint::SetMute => "/api/mute",
            BridgeEndpoint::Media(MediaAction::Play) => "/api/media/play",
            BridgeEndpoint::Media(MediaAction::Pause) => "/api/media/pause",
            BridgeEndpoint::Media(MediaAction::Stop) => "/api/media/stop",
            BridgeEndpoint::Media(MediaAction::Next) => "/api/media/next",
            BridgeEndpoint::Media(MediaAction::Previous) => "/api/media/previous",
            BridgeEndpoint::Media(MediaAction::PlayPause) => "/api/media/play_pause",
            BridgeEndpoint::Seek => "/api/media/seek",
            BridgeEndpoint::SetShuffle => "/api/media/shuffle",
            BridgeEndpoint::SetRepeat => "/api/media/repeat",
            BridgeEndpoint::AudioDevices => "/api/audio/devices",
            BridgeEndpoint::OutputDevice | BridgeEndpoint::SetOutputDevice => "/api/audio/output",
            BridgeEndpoint::InputDevice | BridgeEndpoint::SetInputDevice => "/api/audio/input",
        }
    }

    pub fn method(self) -> HttpMethod {
        match self {
            BridgeEndpoint::Status
            | BridgeEndpoint::MediaInfo
            | BridgeEndpoint::MediaState
            | BridgeEndpoint::AudioDevices
            | BridgeEndpoint::OutputDevice
            | BridgeEndpoint::InputDevice => HttpMethod::Get,
            BridgeEndpoint::SetVolume
            | BridgeEndpoint::SetMute
            | BridgeEndpoint::Media(_)
            | BridgeEndpoint::Seek
            | BridgeEndpoint::SetShuffle
            | BridgeEndpoint::SetRepeat
            | BridgeEndpoint::SetOutputDevice
            | BridgeEndpoint::SetInputDevice => HttpMethod::Post,
        }
    }
}

impl fmt::Display for BridgeEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let method = match self.method() {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        };
        write!(f, "{method} {}", self.path())
    }
}
