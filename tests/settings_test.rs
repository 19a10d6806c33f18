use std::io::Write;

use galatea::application::services::ExtractionFailurePolicy;
use galatea::domain::{AudioEncoding, Language, VoiceGender};
use galatea::presentation::config::{
    GOOGLE_CREDENTIALS_VAR, OPENAI_API_KEY_VAR, Settings, SettingsError, SpeechProvider,
};
use galatea::presentation::Environment;

fn settings_with(overrides: &[(&str, &str)]) -> Result<Settings, SettingsError> {
    let mut builder = Settings::defaults().unwrap();
    for (key, value) in overrides {
        builder = builder.set_override(*key, *value).unwrap();
    }
    Settings::from_builder(builder)
}

#[test]
fn given_api_keys_only_when_loading_then_defaults_fill_every_section() {
    let settings = settings_with(&[
        ("llm.api_key", "sk-test"),
        ("speech.api_key", "tts-key"),
    ])
    .unwrap();

    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.server.port, 3000);
    assert_eq!(settings.llm.request_timeout_secs, 60);
    assert!(settings.llm.base_url.is_none());
    assert_eq!(settings.speech.provider, SpeechProvider::Google);
    assert_eq!(settings.speech.voice_gender, VoiceGender::Female);
    assert_eq!(settings.speech.audio_encoding, AudioEncoding::Mp3);
    assert_eq!(settings.extraction.language, Language::Spanish);
    assert_eq!(settings.extraction.timeout_secs, 30);
    assert_eq!(
        settings.extraction.failure_policy,
        ExtractionFailurePolicy::Abort
    );
    assert_eq!(settings.max_upload_bytes(), 20 * 1024 * 1024);
    assert!(!settings.logging.json_format);
}

#[test]
fn given_default_settings_when_building_chat_options_then_uses_spanish_fallback_and_voice() {
    let settings = settings_with(&[
        ("llm.api_key", "sk-test"),
        ("speech.api_key", "tts-key"),
    ])
    .unwrap();

    let options = settings.chat_options();

    assert_eq!(
        options.fallback_message,
        "Lo siento, no puedo procesar tu solicitud en este momento."
    );
    assert_eq!(options.voice.language_code, "es-ES");
    assert_eq!(options.extraction_failure_policy, ExtractionFailurePolicy::Abort);
}

#[test]
fn given_missing_openai_key_when_loading_then_fails_naming_variable() {
    let result = settings_with(&[("speech.api_key", "tts-key")]);

    match result {
        Err(SettingsError::MissingSecret(var)) => assert_eq!(var, OPENAI_API_KEY_VAR),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn given_google_provider_without_credentials_when_loading_then_fails_naming_variable() {
    let result = settings_with(&[("llm.api_key", "sk-test")]);

    match result {
        Err(SettingsError::MissingSecret(var)) => assert_eq!(var, GOOGLE_CREDENTIALS_VAR),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn given_credentials_path_that_does_not_exist_when_loading_then_fails() {
    let result = settings_with(&[
        ("llm.api_key", "sk-test"),
        ("speech.credentials_path", "/nonexistent/galatea/sa.json"),
    ]);

    assert!(matches!(
        result,
        Err(SettingsError::CredentialsFileNotFound(_))
    ));
}

#[test]
fn given_existing_credentials_file_when_loading_then_succeeds() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"{}").unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let settings = settings_with(&[
        ("llm.api_key", "sk-test"),
        ("speech.credentials_path", path.as_str()),
    ])
    .unwrap();

    assert_eq!(
        settings.speech.credentials_path.as_deref(),
        Some(file.path())
    );
}

#[test]
fn given_disabled_speech_when_loading_then_google_credentials_are_not_required() {
    let settings = settings_with(&[
        ("llm.api_key", "sk-test"),
        ("speech.provider", "disabled"),
    ])
    .unwrap();

    assert_eq!(settings.speech.provider, SpeechProvider::Disabled);
}

#[test]
fn given_overrides_when_loading_then_typed_values_are_parsed() {
    let settings = settings_with(&[
        ("llm.api_key", "sk-test"),
        ("speech.provider", "disabled"),
        ("server.port", "8080"),
        ("extraction.language", "english"),
        ("extraction.failure_policy", "degrade"),
        ("speech.audio_encoding", "ogg_opus"),
        ("logging.json_format", "true"),
    ])
    .unwrap();

    assert_eq!(settings.server.port, 8080);
    assert_eq!(settings.extraction.language, Language::English);
    assert_eq!(
        settings.extraction.failure_policy,
        ExtractionFailurePolicy::Degrade
    );
    assert_eq!(settings.speech.audio_encoding, AudioEncoding::OggOpus);
    assert!(settings.logging.json_format);
}

#[test]
fn given_zero_upload_limit_when_loading_then_fails() {
    let result = settings_with(&[
        ("llm.api_key", "sk-test"),
        ("speech.provider", "disabled"),
        ("extraction.max_upload_mb", "0"),
    ]);

    assert!(matches!(result, Err(SettingsError::Invalid(_))));
}

#[test]
fn given_environment_names_when_parsing_then_accepts_aliases() {
    assert_eq!(
        Environment::try_from("production".to_string()).unwrap(),
        Environment::Prod
    );
    assert_eq!(
        Environment::try_from("Development".to_string()).unwrap(),
        Environment::Local
    );
    assert!(Environment::try_from("staging".to_string()).is_err());
    assert_eq!(Environment::Test.settings_file_stem(), "appsettings.test");
}
