//! XML and the XML vocabularies recognised by their root element or
//! namespace.

use crate::{contains, trim_start};

pub fn xml(raw: &[u8], _limit: u32) -> bool {
    trim_start(raw)
        .get(..5)
        .is_some_and(|decl| decl.eq_ignore_ascii_case(b"<?xml"))
}

/// Every marker occurs somewhere in the (limited) input.
fn has_all(raw: &[u8], markers: &[&[u8]]) -> bool {
    markers.iter().all(|marker| contains(raw, marker))
}

pub fn rss(raw: &[u8], _limit: u32) -> bool {
    has_all(raw, &[b"<rss"])
}

pub fn atom(raw: &[u8], _limit: u32) -> bool {
    has_all(raw, &[b"<feed", b"http://www.w3.org/2005/Atom"])
}

pub fn x3d(raw: &[u8], _limit: u32) -> bool {
    has_all(raw, &[b"<X3D"])
}

pub fn kml(raw: &[u8], _limit: u32) -> bool {
    has_all(raw, &[b"<kml"])
}

pub fn xliff(raw: &[u8], _limit: u32) -> bool {
    has_all(raw, &[b"<xliff"])
}

pub fn collada(raw: &[u8], _limit: u32) -> bool {
    has_all(raw, &[b"<COLLADA"])
}

/// Geography Markup Language.
pub fn gml(raw: &[u8], _limit: u32) -> bool {
    has_all(raw, &[b"http://www.opengis.net/gml"])
}

pub fn gpx(raw: &[u8], _limit: u32) -> bool {
    has_all(raw, &[b"<gpx"])
}

/// Garmin Training Center.
pub fn tcx(raw: &[u8], _limit: u32) -> bool {
    has_all(raw, &[b"<TrainingCenterDatabase"])
}

/// Additive Manufacturing File.
pub fn amf(raw: &[u8], _limit: u32) -> bool {
    has_all(raw, &[b"<amf"])
}

/// 3D Manufacturing Format model part.
pub fn threemf(raw: &[u8], _limit: u32) -> bool {
    has_all(
        raw,
        &[
            b"<model",
            b"http://schemas.microsoft.com/3dmanufacturing/core/2015/02",
        ],
    )
}

pub fn xfdf(raw: &[u8], _limit: u32) -> bool {
    has_all(raw, &[b"<xfdf"])
}

/// OWL 2 ontology in XML serialization.
pub fn owl2(raw: &[u8], _limit: u32) -> bool {
    has_all(raw, &[b"<Ontology", b"http://www.w3.org/2002/07/owl#"])
}
