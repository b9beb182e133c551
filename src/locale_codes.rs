//! Locale codes used by the Mozilla localization teams.
//!
//! Source: <https://wiki.mozilla.org/L10n:Localization_Teams>

use std::collections::BTreeSet;

/// Sorted list of known Mozilla locale codes.
pub const MOZILLA_LOCALE_CODES: &[&str] = &[
    "ach", "af", "ak", "am", "an", "anp", "ar", "arq", "as", "ast", "aym", "az", "bal", "bcl", "be",
    "bg", "bg-IV", "bho", "bm", "bn-BD", "bn-IN", "bo", "bpy", "br", "brx", "bs", "bzj-BZ", "ca",
    "ca-valencia", "cak-GT", "cax-BO", "cbk", "chf-MX", "ckb", "cly-MX", "co", "crh", "crn-MX",
    "cs", "ctu-MX", "cy", "da", "de", "doi", "dsb", "dz", "el", "en-ARRR", "en-CA", "en-GB",
    "en-Shaw", "en-US", "en-ZA", "eo", "es", "es-AR", "es-CL", "es-ES", "es-MX", "et", "eu", "fa",
    "ff", "fi", "fj", "fo", "fr", "fur", "fy-NL", "ga-IE", "gd", "gl", "gn-BO", "gn-PY", "gu-IN",
    "ha", "haw", "hch-MX", "he", "hi-IN", "hr", "hsb", "ht", "hu", "hus-MX", "hy-AM", "id", "ig",
    "ilo", "is", "it", "ixl-GT", "ja", "jam-JM", "jbo", "jv", "ka", "kab", "kea", "kek-GT", "ki",
    "kj", "kk", "km", "kn", "ko", "kok", "ks", "ks-deva", "ku", "kw", "ky", "ky-cyrl", "la", "laj",
    "lb", "lg", "lgg", "lij", "lmo", "lo", "lt", "lv", "mag", "mai", "mam-GT", "man", "mau-MX",
    "meh-MX", "mg", "mi", "min", "mit-MX", "mix-MX", "mk", "ml", "mn", "mni", "mqh-MX", "mr", "ms",
    "mxp-MX", "my", "myv", "nb-NO", "nch-MX", "nci-MX", "ncj-MX", "nd", "ne-NP", "nl", "nn-NO",
    "nso", "nv", "ny", "oc", "oc-ES-aranese", "om", "or", "os", "ote-MX", "oto-MX", "pa", "pl",
    "pms", "ppl-SV", "prs", "ps", "pt-BR", "pt-PT", "quh", "quy", "quz", "qvi-EC", "rm", "rn", "ro",
    "ru", "rue", "rw", "sa", "sah", "sc", "scn", "shn", "si", "sio-US-lkt", "sk", "sl", "sm", "sn",
    "sna-zw", "son", "sq", "sr", "srd", "st", "su", "sv-SE", "sw", "szl", "ta", "ta-LK", "te",
    "teo", "tg", "th", "ti", "tl", "tn", "to", "toj-MX", "tr", "trs-MX", "tsz-MX", "tt", "tzh-MX",
    "tzj-GT", "tzo-MX", "ug", "uk", "ur", "uz", "vi", "vmz-MX", "wa", "wo", "xh", "xog", "yaq-MX",
    "yo", "yo-NG", "yua-MX", "yue", "zai", "zam-MX", "zar-MX", "zh-CN", "zh-TW", "zty-MX", "zu",
];

/// The known locale set: the static Mozilla list plus any extra codes.
pub fn known_locale_codes<I, S>(extra: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    MOZILLA_LOCALE_CODES
        .iter()
        .map(|code| code.to_string())
        .chain(extra.into_iter().map(Into::into))
        .collect()
}
