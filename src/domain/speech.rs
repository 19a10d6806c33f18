use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceGender {
    #[default]
    Female,
    Male,
    Neutral,
}

impl VoiceGender {
    pub fn as_api_str(&self) -> &'static str {
        match self {
            VoiceGender::Female => "FEMALE",
            VoiceGender::Male => "MALE",
            VoiceGender::Neutral => "NEUTRAL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioEncoding {
    #[default]
    Mp3,
    OggOpus,
    Linear16,
}

impl AudioEncoding {
    pub fn as_api_str(&self) -> &'static str {
        match self {
            AudioEncoding::Mp3 => "MP3",
            AudioEncoding::OggOpus => "OGG_OPUS",
            AudioEncoding::Linear16 => "LINEAR16",
        }
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            AudioEncoding::Mp3 => "audio/mpeg",
            AudioEncoding::OggOpus => "audio/ogg",
            AudioEncoding::Linear16 => "audio/wav",
        }
    }
}

/// Voice and encoding used for every synthesized reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceSelection {
    pub language_code: String,
    pub gender: VoiceGender,
    pub encoding: AudioEncoding,
}

impl Default for VoiceSelection {
    fn default() -> Self {
        Self {
            language_code: "es-ES".to_string(),
            gender: VoiceGender::Female,
            encoding: AudioEncoding::Mp3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedAudio {
    pub encoding: AudioEncoding,
    pub bytes: Vec<u8>,
}
