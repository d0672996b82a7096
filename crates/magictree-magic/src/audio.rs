//! Audio formats and playlists.

use crate::{ftyp, offset, prefix, riff};

/// MPEG-1 Audio Layer III: ID3v2 tag, or a bare frame sync.
pub fn mp3(raw: &[u8], _limit: u32) -> bool {
    prefix(raw, &[b"ID3", b"\xFF\xFB", b"\xFF\xF3", b"\xFF\xF2"])
}

pub fn flac(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"fLaC")
}

pub fn midi(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"MThd")
}

/// Monkey's Audio.
pub fn ape(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"MAC \x96\x0F\x00\x00\x34\x00\x00\x00\x18\x00\x00\x00\x90\xE3")
}

pub fn musepack(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"MPCK")
}

pub fn amr(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"#!AMR")
}

pub fn wav(raw: &[u8], _limit: u32) -> bool {
    riff(raw, b"WAVE")
}

pub fn aiff(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"FORM") && offset(raw, b"AIFF", 8)
}

/// Sun/NeXT audio.
pub fn au(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b".snd")
}

/// AAC in an ADTS stream.
pub fn aac(raw: &[u8], _limit: u32) -> bool {
    prefix(raw, &[b"\xFF\xF1", b"\xFF\xF9"])
}

/// Creative Voice.
pub fn voc(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"Creative Voice File")
}

pub fn qcp(raw: &[u8], _limit: u32) -> bool {
    riff(raw, b"QLCM")
}

/// Ogg container, any codec.
pub fn ogg(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"OggS")
}

/// Ogg whose first logical stream carries audio.
pub fn ogg_audio(raw: &[u8], _limit: u32) -> bool {
    [
        &b"\x7FFLAC"[..],
        b"\x01vorbis",
        b"OpusHead",
        b"Speex\x20\x20\x20",
    ]
    .iter()
    .any(|codec| offset(raw, codec, 28))
}

/// Audio-only MPEG-4 (Flash, audio book and protected variants).
pub fn audio_mp4(raw: &[u8], _limit: u32) -> bool {
    ftyp(raw, &[b"F4A ", b"F4B ", b"M4B ", b"M4P ", b"MSNV", b"NDAS"])
}

pub fn m4a(raw: &[u8], _limit: u32) -> bool {
    ftyp(raw, &[b"M4A "])
}

/// Extended M3U playlist.
pub fn m3u(raw: &[u8], _limit: u32) -> bool {
    raw.starts_with(b"#EXTM3U")
}
