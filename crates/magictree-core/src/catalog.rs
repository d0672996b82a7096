//! The built-in format hierarchy.
//!
//! Order matters: at every level the first matching child wins and its
//! later siblings are never tried. The specific formats stored inside a
//! container (ZIP, OLE, ELF) are its children rather than its siblings.
//! `text/plain` is the last child of the root because its detector scans
//! the whole input.

use magictree_magic::{
    archive, audio, data, document, executable, font, image, markup, structured, text, video,
};

use crate::detector::Detector;
use crate::node::Node;

/// The default tree, rooted at `application/octet-stream`.
pub fn root() -> Node {
    Node::root().with_children([
        Node::new("image/x-xpixmap", ".xpm", image::xpm),
        Node::new("application/x-7z-compressed", ".7z", archive::seven_z),
        zip(),
        Node::new("application/pdf", ".pdf", document::pdf).alias(["application/x-pdf"]),
        Node::new("application/vnd.fdf", ".fdf", document::fdf),
        ole(),
        Node::new("application/postscript", ".ps", document::ps),
        Node::new("image/vnd.adobe.photoshop", ".psd", image::psd)
            .alias(["image/x-psd", "application/photoshop"]),
        Node::new("application/pkcs7-signature", ".p7s", document::p7s),
        ogg(),
        Node::new("image/png", ".png", image::png),
        Node::new("image/jpeg", ".jpg", image::jpg),
        Node::new("image/jxl", ".jxl", image::jxl),
        Node::new("image/jp2", ".jp2", image::jp2),
        Node::new("image/jpx", ".jpf", image::jpx),
        Node::new("image/jpm", ".jpm", image::jpm).alias(["video/jpm"]),
        Node::new("image/gif", ".gif", image::gif),
        Node::new("image/webp", ".webp", image::webp),
        Node::new(
            "application/vnd.microsoft.portable-executable",
            ".exe",
            executable::exe,
        ),
        elf(),
        Node::new("application/x-archive", ".a", archive::ar)
            .with_children([Node::new(
                "application/vnd.debian.binary-package",
                ".deb",
                archive::deb,
            )])
            .alias(["application/x-unix-archive"]),
        Node::new("application/x-tar", ".tar", archive::tar),
        Node::new("application/x-xar", ".xar", archive::xar),
        Node::new("application/x-bzip2", ".bz2", archive::bz2),
        Node::new("application/fits", ".fits", image::fits),
        Node::new("image/tiff", ".tiff", image::tiff),
        Node::new("image/bmp", ".bmp", image::bmp).alias(["image/x-bmp", "image/x-ms-bmp"]),
        Node::new("image/x-icon", ".ico", image::ico),
        Node::new("audio/mpeg", ".mp3", audio::mp3).alias(["audio/x-mpeg", "audio/mp3"]),
        Node::new("audio/flac", ".flac", audio::flac),
        Node::new("audio/midi", ".midi", audio::midi).alias([
            "audio/mid",
            "audio/sp-midi",
            "audio/x-mid",
            "audio/x-midi",
        ]),
        Node::new("audio/ape", ".ape", audio::ape),
        Node::new("audio/musepack", ".mpc", audio::musepack),
        Node::new("audio/amr", ".amr", audio::amr).alias(["audio/amr-nb"]),
        Node::new("audio/wav", ".wav", audio::wav).alias([
            "audio/x-wav",
            "audio/vnd.wave",
            "audio/wave",
        ]),
        Node::new("audio/aiff", ".aiff", audio::aiff),
        Node::new("audio/basic", ".au", audio::au),
        Node::new("video/mpeg", ".mpeg", video::mpeg),
        Node::new("video/quicktime", ".mov", video::quicktime),
        Node::new("video/quicktime", ".mqv", video::mqv),
        Node::new("video/mp4", ".mp4", video::mp4),
        Node::new("video/webm", ".webm", video::webm).alias(["audio/webm"]),
        Node::new("video/3gpp", ".3gp", video::three_gp).alias(["video/3gp", "audio/3gpp"]),
        Node::new("video/3gpp2", ".3g2", video::three_g2).alias(["video/3g2", "audio/3gpp2"]),
        Node::new("video/x-msvideo", ".avi", video::avi).alias(["video/avi", "video/msvideo"]),
        Node::new("video/x-flv", ".flv", video::flv),
        Node::new("video/x-matroska", ".mkv", video::mkv),
        Node::new("video/x-ms-asf", ".asf", video::asf).alias(["video/asf", "video/x-ms-wmv"]),
        Node::new("audio/aac", ".aac", audio::aac),
        Node::new("audio/x-unknown", ".voc", audio::voc),
        Node::new("audio/mp4", ".mp4", audio::audio_mp4).alias(["audio/x-m4a", "audio/x-mp4a"]),
        Node::new("audio/x-m4a", ".m4a", audio::m4a),
        Node::new("application/vnd.apple.mpegurl", ".m3u", audio::m3u).alias(["audio/mpegurl"]),
        Node::new("video/x-m4v", ".m4v", video::m4v),
        Node::new("application/vnd.rn-realmedia-vbr", ".rmvb", video::rmvb),
        Node::new("application/gzip", ".gz", archive::gzip).alias([
            "application/x-gzip",
            "application/x-gunzip",
            "application/gzipped",
            "application/gzip-compressed",
            "application/x-gzip-compressed",
            "gzip/document",
        ]),
        Node::new("application/x-java-applet", ".class", executable::class),
        Node::new("application/x-shockwave-flash", ".swf", executable::swf),
        Node::new("application/x-chrome-extension", ".crx", archive::crx),
        Node::new("font/ttf", ".ttf", font::ttf).alias([
            "font/sfnt",
            "application/x-font-ttf",
            "application/font-sfnt",
        ]),
        Node::new("font/woff", ".woff", font::woff),
        Node::new("font/woff2", ".woff2", font::woff2),
        Node::new("font/otf", ".otf", font::otf),
        Node::new("application/vnd.ms-fontobject", ".eot", font::eot),
        Node::new("application/wasm", ".wasm", executable::wasm),
        Node::new("application/octet-stream", ".shx", data::shx).with_children([Node::new(
            "application/octet-stream",
            ".shp",
            data::shp,
        )]),
        Node::new("application/x-dbf", ".dbf", data::dbf),
        Node::new("application/dicom", ".dcm", image::dcm),
        Node::new("application/x-rar-compressed", ".rar", archive::rar).alias(["application/x-rar"]),
        Node::new("image/vnd.djvu", ".djvu", image::djvu),
        Node::new("application/x-mobipocket-ebook", ".mobi", document::mobi),
        Node::new("application/x-ms-reader", ".lit", document::lit),
        Node::new("image/bpg", ".bpg", image::bpg),
        Node::new("application/x-sqlite3", ".sqlite", data::sqlite),
        Node::new("image/vnd.dwg", ".dwg", image::dwg).alias([
            "image/x-dwg",
            "application/acad",
            "application/x-acad",
            "application/autocad_dwg",
            "application/dwg",
            "application/x-dwg",
            "application/x-autocad",
            "drawing/dwg",
        ]),
        Node::new("application/vnd.nintendo.snes.rom", ".nes", executable::nes),
        Node::new("application/x-ms-shortcut", ".lnk", executable::lnk),
        Node::new("application/x-mach-binary", ".macho", executable::macho),
        Node::new("audio/qcelp", ".qcp", audio::qcp),
        Node::new("image/x-icns", ".icns", image::icns),
        Node::new("image/heic", ".heic", image::heic),
        Node::new("image/heic-sequence", ".heic", image::heic_sequence),
        Node::new("image/heif", ".heif", image::heif),
        Node::new("image/heif-sequence", ".heif", image::heif_sequence),
        Node::new("image/vnd.radiance", ".hdr", image::hdr),
        Node::new("application/marc", ".mrc", document::marc),
        Node::new("application/x-msaccess", ".mdb", data::mdb),
        Node::new("application/x-msaccess", ".accdb", data::accdb),
        Node::new("application/zstd", ".zst", archive::zstd),
        Node::new("application/vnd.ms-cab-compressed", ".cab", archive::cab),
        Node::new("application/x-rpm", ".rpm", archive::rpm),
        Node::new("application/x-xz", ".xz", archive::xz),
        Node::new("application/lzip", ".lz", archive::lzip),
        Node::new("application/x-bittorrent", ".torrent", archive::torrent),
        Node::new("application/x-cpio", ".cpio", archive::cpio),
        Node::new("application/tzif", "", data::tzif),
        Node::new("image/x-xcf", ".xcf", image::xcf),
        Node::new("image/x-gimp-pat", ".pat", image::pat),
        Node::new("image/x-gimp-gbr", ".gbr", image::gbr),
        Node::new("model/gltf-binary", ".glb", data::glb),
        plain_text(),
    ])
}

// ============================================================================
// Containers
// ============================================================================

fn zip() -> Node {
    Node::new("application/zip", ".zip", archive::zip)
        .with_children([
            Node::new(
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
                ".xlsx",
                document::xlsx,
            ),
            Node::new(
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
                ".docx",
                document::docx,
            ),
            Node::new(
                "application/vnd.openxmlformats-officedocument.presentationml.presentation",
                ".pptx",
                document::pptx,
            ),
            Node::new("application/epub+zip", ".epub", document::epub),
            Node::new("application/jar", ".jar", document::jar),
            open_document("text", ".odt", document::odt).with_children([open_document(
                "text-template",
                ".ott",
                document::ott,
            )]),
            open_document("spreadsheet", ".ods", document::ods).with_children([open_document(
                "spreadsheet-template",
                ".ots",
                document::ots,
            )]),
            open_document("presentation", ".odp", document::odp).with_children([open_document(
                "presentation-template",
                ".otp",
                document::otp,
            )]),
            open_document("graphics", ".odg", document::odg).with_children([open_document(
                "graphics-template",
                ".otg",
                document::otg,
            )]),
            open_document("formula", ".odf", document::odf),
            open_document("chart", ".odc", document::odc),
            Node::new("application/vnd.sun.xml.calc", ".sxc", document::sxc),
        ])
        .alias(["application/x-zip", "application/x-zip-compressed"])
}

/// An OpenDocument format and its `application/x-vnd.` alias.
fn open_document(kind: &str, extension: &str, detector: impl Detector + 'static) -> Node {
    Node::new(
        format!("application/vnd.oasis.opendocument.{kind}"),
        extension,
        detector,
    )
    .alias([format!("application/x-vnd.oasis.opendocument.{kind}")])
}

fn ole() -> Node {
    Node::new("application/x-ole-storage", "", document::ole).with_children([
        Node::new("application/octet-stream", ".aaf", document::aaf),
        Node::new("application/vnd.ms-outlook", ".msg", document::msg),
        Node::new("application/vnd.ms-excel", ".xls", document::xls).alias(["application/msexcel"]),
        Node::new("application/vnd.ms-publisher", ".pub", document::publisher),
        Node::new("application/vnd.ms-powerpoint", ".ppt", document::ppt)
            .alias(["application/mspowerpoint"]),
        Node::new("application/msword", ".doc", document::doc).alias(["application/vnd.ms-word"]),
    ])
}

fn ogg() -> Node {
    Node::new("application/ogg", ".ogg", audio::ogg)
        .with_children([
            Node::new("audio/ogg", ".oga", audio::ogg_audio),
            Node::new("video/ogg", ".ogv", video::ogg_video),
        ])
        .alias(["application/x-ogg"])
}

fn elf() -> Node {
    Node::new("application/x-elf", "", executable::elf).with_children([
        Node::new("application/x-object", "", executable::elf_obj),
        Node::new("application/x-executable", "", executable::elf_exe),
        Node::new("application/x-sharedlib", ".so", executable::elf_lib),
        Node::new("application/x-coredump", "", executable::elf_dump),
    ])
}

// ============================================================================
// Text
// ============================================================================

fn plain_text() -> Node {
    Node::new("text/plain", ".txt", text::text).with_children([
        Node::new("text/html", ".html", text::html),
        Node::new("image/svg+xml", ".svg", text::svg),
        xml(),
        Node::new("text/x-php", ".php", text::php),
        Node::new("application/javascript", ".js", text::js)
            .alias(["application/x-javascript", "text/javascript"]),
        Node::new("text/x-lua", ".lua", text::lua),
        Node::new("text/x-perl", ".pl", text::perl),
        Node::new("application/x-python", ".py", text::python),
        Node::new("application/json", ".json", structured::json).with_children([
            Node::new("application/geo+json", ".geojson", structured::geojson),
            Node::new("application/json", ".har", structured::har),
        ]),
        Node::new("application/x-ndjson", ".ndjson", structured::ndjson),
        Node::new("text/rtf", ".rtf", text::rtf),
        Node::new("text/x-tcl", ".tcl", text::tcl).alias(["application/x-tcl"]),
        Node::new("text/csv", ".csv", structured::csv),
        Node::new("text/tab-separated-values", ".tsv", structured::tsv),
        Node::new("text/vcard", ".vcf", text::vcard),
        Node::new("text/calendar", ".ics", text::icalendar),
        Node::new("application/warc", ".warc", text::warc),
    ])
}

fn xml() -> Node {
    Node::new("text/xml", ".xml", markup::xml).with_children([
        Node::new("application/rss+xml", ".rss", markup::rss).alias(["text/rss"]),
        Node::new("application/atom+xml", ".atom", markup::atom),
        Node::new("model/x3d+xml", ".x3d", markup::x3d),
        Node::new("application/vnd.google-earth.kml+xml", ".kml", markup::kml),
        Node::new("application/x-xliff+xml", ".xlf", markup::xliff),
        Node::new("model/vnd.collada+xml", ".dae", markup::collada),
        Node::new("application/gml+xml", ".gml", markup::gml),
        Node::new("application/gpx+xml", ".gpx", markup::gpx),
        Node::new("application/vnd.garmin.tcx+xml", ".tcx", markup::tcx),
        Node::new("application/x-amf", ".amf", markup::amf),
        Node::new(
            "application/vnd.ms-package.3dmanufacturing-3dmodel+xml",
            ".3mf",
            markup::threemf,
        ),
        Node::new("application/vnd.adobe.xfdf", ".xfdf", markup::xfdf),
        Node::new("application/owl+xml", ".owl", markup::owl2),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Tree;

    fn tree() -> Tree {
        Tree::new(root())
    }

    fn detect(input: &[u8]) -> String {
        tree().descend(input, 3072).identifier().to_string()
    }

    #[test]
    fn text_is_last_root_child() {
        let root = root();
        let last = root.children().last().unwrap();
        assert_eq!(last.identifier(), "text/plain");
    }

    #[test]
    fn every_node_but_structural_ones_has_extension() {
        let tree = tree();
        let without: Vec<String> = tree
            .walk()
            .into_iter()
            .filter(|entry| entry.mime.extension().is_empty())
            .map(|entry| entry.mime.identifier().to_string())
            .collect();
        assert_eq!(
            without,
            [
                "application/octet-stream",
                "application/x-ole-storage",
                "application/x-elf",
                "application/x-object",
                "application/x-executable",
                "application/x-coredump",
                "application/tzif",
            ]
        );
    }

    #[test]
    fn extensions_start_with_dot() {
        for entry in tree().walk() {
            let ext = entry.mime.extension();
            assert!(ext.is_empty() || ext.starts_with('.'), "{ext}");
        }
    }

    #[test]
    fn open_document_template_nests_under_parent() {
        let tree = tree();
        let id = tree
            .find("application/vnd.oasis.opendocument.spreadsheet-template")
            .unwrap();
        let ots = tree.get(id).unwrap();
        assert_eq!(ots.extension(), ".ots");
        assert!(ots.is("application/x-vnd.oasis.opendocument.spreadsheet-template"));
        assert_eq!(
            ots.parent().unwrap().identifier(),
            "application/vnd.oasis.opendocument.spreadsheet"
        );
    }

    #[test]
    fn representative_signatures() {
        assert_eq!(detect(b"\x89PNG\r\n\x1A\n\x00\x00"), "image/png");
        assert_eq!(detect(b"%PDF-1.7\n"), "application/pdf");
        assert_eq!(detect(b"\x1f\x8b\x08\x00"), "application/gzip");
        assert_eq!(detect(b"GIF89a\x01\x00"), "image/gif");
        assert_eq!(detect(b"\x00asm\x01\x00\x00\x00"), "application/wasm");
        assert_eq!(detect(b"SQLite format 3\x00"), "application/x-sqlite3");
        assert_eq!(detect(b"{\"a\": 1}"), "application/json");
        assert_eq!(detect(b"a,b\n1,2\n"), "text/csv");
        assert_eq!(detect(b"hello world\n"), "text/plain");
        assert_eq!(detect(b"\x00\x01\x02\x03"), "application/octet-stream");
        assert_eq!(detect(b""), "application/octet-stream");
    }

    #[test]
    fn xml_vocabularies() {
        let rss = b"<?xml version=\"1.0\"?>\n<rss version=\"2.0\"><channel/></rss>";
        assert_eq!(detect(rss), "application/rss+xml");
        let plain = b"<?xml version=\"1.0\"?>\n<note/>";
        assert_eq!(detect(plain), "text/xml");
    }

    #[test]
    fn svg_wins_over_xml() {
        let svg = b"<?xml version=\"1.0\"?>\n<svg xmlns=\"http://www.w3.org/2000/svg\"/>";
        assert_eq!(detect(svg), "image/svg+xml");
    }
}
