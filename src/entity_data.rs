//! The character-reference catalog.
//!
//! Each record is `(name, first, second)`: the reference name without the
//! leading `&` or trailing `;`, and one or two Unicode code points. A
//! `second` of zero means the reference expands to a single code point.
//! Names are case-sensitive; the handful of historical all-caps aliases
//! (`AMP`, `COPY`, …) are ordinary records.
//!
//! The table is data, not logic: adding a name here is the whole change
//! needed to support a new reference.

pub(crate) static ENTITIES: &[(&str, u32, u32)] = &[
    // C0 ASCII punctuation.
    ("excl", 0x0021, 0),
    ("quot", 0x0022, 0),
    ("num", 0x0023, 0),
    ("dollar", 0x0024, 0),
    ("percnt", 0x0025, 0),
    ("amp", 0x0026, 0),
    ("apos", 0x0027, 0),
    ("lpar", 0x0028, 0),
    ("rpar", 0x0029, 0),
    ("ast", 0x002A, 0),
    ("plus", 0x002B, 0),
    ("comma", 0x002C, 0),
    ("period", 0x002E, 0),
    ("sol", 0x002F, 0),
    ("colon", 0x003A, 0),
    ("semi", 0x003B, 0),
    ("lt", 0x003C, 0),
    ("equals", 0x003D, 0),
    ("gt", 0x003E, 0),
    ("quest", 0x003F, 0),
    ("commat", 0x0040, 0),
    ("lsqb", 0x005B, 0),
    ("bsol", 0x005C, 0),
    ("rsqb", 0x005D, 0),
    ("Hat", 0x005E, 0),
    ("lowbar", 0x005F, 0),
    ("grave", 0x0060, 0),
    ("lcub", 0x007B, 0),
    ("verbar", 0x007C, 0),
    ("rcub", 0x007D, 0),
    // Historical all-caps aliases, registered verbatim.
    ("AMP", 0x0026, 0),
    ("COPY", 0x00A9, 0),
    ("GT", 0x003E, 0),
    ("LT", 0x003C, 0),
    ("QUOT", 0x0022, 0),
    ("REG", 0x00AE, 0),
    ("TRADE", 0x2122, 0),
    // Latin-1 supplement.
    ("nbsp", 0x00A0, 0),
    ("iexcl", 0x00A1, 0),
    ("cent", 0x00A2, 0),
    ("pound", 0x00A3, 0),
    ("curren", 0x00A4, 0),
    ("yen", 0x00A5, 0),
    ("brvbar", 0x00A6, 0),
    ("sect", 0x00A7, 0),
    ("uml", 0x00A8, 0),
    ("copy", 0x00A9, 0),
    ("ordf", 0x00AA, 0),
    ("laquo", 0x00AB, 0),
    ("not", 0x00AC, 0),
    ("shy", 0x00AD, 0),
    ("reg", 0x00AE, 0),
    ("macr", 0x00AF, 0),
    ("deg", 0x00B0, 0),
    ("plusmn", 0x00B1, 0),
    ("sup2", 0x00B2, 0),
    ("sup3", 0x00B3, 0),
    ("acute", 0x00B4, 0),
    ("micro", 0x00B5, 0),
    ("para", 0x00B6, 0),
    ("middot", 0x00B7, 0),
    ("cedil", 0x00B8, 0),
    ("sup1", 0x00B9, 0),
    ("ordm", 0x00BA, 0),
    ("raquo", 0x00BB, 0),
    ("frac14", 0x00BC, 0),
    ("frac12", 0x00BD, 0),
    ("frac34", 0x00BE, 0),
    ("iquest", 0x00BF, 0),
    ("Agrave", 0x00C0, 0),
    ("Aacute", 0x00C1, 0),
    ("Acirc", 0x00C2, 0),
    ("Atilde", 0x00C3, 0),
    ("Auml", 0x00C4, 0),
    ("Aring", 0x00C5, 0),
    ("AElig", 0x00C6, 0),
    ("Ccedil", 0x00C7, 0),
    ("Egrave", 0x00C8, 0),
    ("Eacute", 0x00C9, 0),
    ("Ecirc", 0x00CA, 0),
    ("Euml", 0x00CB, 0),
    ("Igrave", 0x00CC, 0),
    ("Iacute", 0x00CD, 0),
    ("Icirc", 0x00CE, 0),
    ("Iuml", 0x00CF, 0),
    ("ETH", 0x00D0, 0),
    ("Ntilde", 0x00D1, 0),
    ("Ograve", 0x00D2, 0),
    ("Oacute", 0x00D3, 0),
    ("Ocirc", 0x00D4, 0),
    ("Otilde", 0x00D5, 0),
    ("Ouml", 0x00D6, 0),
    ("times", 0x00D7, 0),
    ("Oslash", 0x00D8, 0),
    ("Ugrave", 0x00D9, 0),
    ("Uacute", 0x00DA, 0),
    ("Ucirc", 0x00DB, 0),
    ("Uuml", 0x00DC, 0),
    ("Yacute", 0x00DD, 0),
    ("THORN", 0x00DE, 0),
    ("szlig", 0x00DF, 0),
    ("agrave", 0x00E0, 0),
    ("aacute", 0x00E1, 0),
    ("acirc", 0x00E2, 0),
    ("atilde", 0x00E3, 0),
    ("auml", 0x00E4, 0),
    ("aring", 0x00E5, 0),
    ("aelig", 0x00E6, 0),
    ("ccedil", 0x00E7, 0),
    ("egrave", 0x00E8, 0),
    ("eacute", 0x00E9, 0),
    ("ecirc", 0x00EA, 0),
    ("euml", 0x00EB, 0),
    ("igrave", 0x00EC, 0),
    ("iacute", 0x00ED, 0),
    ("icirc", 0x00EE, 0),
    ("iuml", 0x00EF, 0),
    ("eth", 0x00F0, 0),
    ("ntilde", 0x00F1, 0),
    ("ograve", 0x00F2, 0),
    ("oacute", 0x00F3, 0),
    ("ocirc", 0x00F4, 0),
    ("otilde", 0x00F5, 0),
    ("ouml", 0x00F6, 0),
    ("divide", 0x00F7, 0),
    ("oslash", 0x00F8, 0),
    ("ugrave", 0x00F9, 0),
    ("uacute", 0x00FA, 0),
    ("ucirc", 0x00FB, 0),
    ("uuml", 0x00FC, 0),
    ("yacute", 0x00FD, 0),
    ("thorn", 0x00FE, 0),
    ("yuml", 0x00FF, 0),
    // Latin extended and spacing modifiers.
    ("OElig", 0x0152, 0),
    ("oelig", 0x0153, 0),
    ("Scaron", 0x0160, 0),
    ("scaron", 0x0161, 0),
    ("Yuml", 0x0178, 0),
    ("fnof", 0x0192, 0),
    ("circ", 0x02C6, 0),
    ("tilde", 0x02DC, 0),
    // Greek.
    ("Alpha", 0x0391, 0),
    ("Beta", 0x0392, 0),
    ("Gamma", 0x0393, 0),
    ("Delta", 0x0394, 0),
    ("Epsilon", 0x0395, 0),
    ("Zeta", 0x0396, 0),
    ("Eta", 0x0397, 0),
    ("Theta", 0x0398, 0),
    ("Iota", 0x0399, 0),
    ("Kappa", 0x039A, 0),
    ("Lambda", 0x039B, 0),
    ("Mu", 0x039C, 0),
    ("Nu", 0x039D, 0),
    ("Xi", 0x039E, 0),
    ("Omicron", 0x039F, 0),
    ("Pi", 0x03A0, 0),
    ("Rho", 0x03A1, 0),
    ("Sigma", 0x03A3, 0),
    ("Tau", 0x03A4, 0),
    ("Upsilon", 0x03A5, 0),
    ("Phi", 0x03A6, 0),
    ("Chi", 0x03A7, 0),
    ("Psi", 0x03A8, 0),
    ("Omega", 0x03A9, 0),
    ("alpha", 0x03B1, 0),
    ("beta", 0x03B2, 0),
    ("gamma", 0x03B3, 0),
    ("delta", 0x03B4, 0),
    ("epsilon", 0x03B5, 0),
    ("zeta", 0x03B6, 0),
    ("eta", 0x03B7, 0),
    ("theta", 0x03B8, 0),
    ("iota", 0x03B9, 0),
    ("kappa", 0x03BA, 0),
    ("lambda", 0x03BB, 0),
    ("mu", 0x03BC, 0),
    ("nu", 0x03BD, 0),
    ("xi", 0x03BE, 0),
    ("omicron", 0x03BF, 0),
    ("pi", 0x03C0, 0),
    ("rho", 0x03C1, 0),
    ("sigmaf", 0x03C2, 0),
    ("sigma", 0x03C3, 0),
    ("tau", 0x03C4, 0),
    ("upsilon", 0x03C5, 0),
    ("phi", 0x03C6, 0),
    ("chi", 0x03C7, 0),
    ("psi", 0x03C8, 0),
    ("omega", 0x03C9, 0),
    ("thetasym", 0x03D1, 0),
    ("upsih", 0x03D2, 0),
    ("piv", 0x03D6, 0),
    // General punctuation.
    ("ensp", 0x2002, 0),
    ("emsp", 0x2003, 0),
    ("emsp13", 0x2004, 0),
    ("emsp14", 0x2005, 0),
    ("numsp", 0x2007, 0),
    ("puncsp", 0x2008, 0),
    ("thinsp", 0x2009, 0),
    ("hairsp", 0x200A, 0),
    ("zwnj", 0x200C, 0),
    ("zwj", 0x200D, 0),
    ("lrm", 0x200E, 0),
    ("rlm", 0x200F, 0),
    ("hyphen", 0x2010, 0),
    ("dash", 0x2010, 0),
    ("ndash", 0x2013, 0),
    ("mdash", 0x2014, 0),
    ("horbar", 0x2015, 0),
    ("Vert", 0x2016, 0),
    ("lsquo", 0x2018, 0),
    ("rsquo", 0x2019, 0),
    ("sbquo", 0x201A, 0),
    ("ldquo", 0x201C, 0),
    ("rdquo", 0x201D, 0),
    ("bdquo", 0x201E, 0),
    ("dagger", 0x2020, 0),
    ("Dagger", 0x2021, 0),
    ("bull", 0x2022, 0),
    ("bullet", 0x2022, 0),
    ("nldr", 0x2025, 0),
    ("hellip", 0x2026, 0),
    ("mldr", 0x2026, 0),
    ("permil", 0x2030, 0),
    ("prime", 0x2032, 0),
    ("Prime", 0x2033, 0),
    ("lsaquo", 0x2039, 0),
    ("rsaquo", 0x203A, 0),
    ("oline", 0x203E, 0),
    ("frasl", 0x2044, 0),
    ("euro", 0x20AC, 0),
    // Letterlike symbols.
    ("Copf", 0x2102, 0),
    ("Hfr", 0x210C, 0),
    ("Hopf", 0x210D, 0),
    ("planck", 0x210F, 0),
    ("image", 0x2111, 0),
    ("ell", 0x2113, 0),
    ("Nopf", 0x2115, 0),
    ("weierp", 0x2118, 0),
    ("Popf", 0x2119, 0),
    ("Qopf", 0x211A, 0),
    ("real", 0x211C, 0),
    ("Ropf", 0x211D, 0),
    ("trade", 0x2122, 0),
    ("Zopf", 0x2124, 0),
    ("Zfr", 0x2128, 0),
    ("Bscr", 0x212C, 0),
    ("Cfr", 0x212D, 0),
    ("escr", 0x212F, 0),
    ("alefsym", 0x2135, 0),
    // Arrows.
    ("larr", 0x2190, 0),
    ("uarr", 0x2191, 0),
    ("rarr", 0x2192, 0),
    ("darr", 0x2193, 0),
    ("harr", 0x2194, 0),
    ("crarr", 0x21B5, 0),
    ("lArr", 0x21D0, 0),
    ("uArr", 0x21D1, 0),
    ("rArr", 0x21D2, 0),
    ("dArr", 0x21D3, 0),
    ("hArr", 0x21D4, 0),
    // Mathematical operators.
    ("forall", 0x2200, 0),
    ("part", 0x2202, 0),
    ("exist", 0x2203, 0),
    ("empty", 0x2205, 0),
    ("nabla", 0x2207, 0),
    ("isin", 0x2208, 0),
    ("notin", 0x2209, 0),
    ("ni", 0x220B, 0),
    ("prod", 0x220F, 0),
    ("sum", 0x2211, 0),
    ("minus", 0x2212, 0),
    ("lowast", 0x2217, 0),
    ("radic", 0x221A, 0),
    ("prop", 0x221D, 0),
    ("infin", 0x221E, 0),
    ("ang", 0x2220, 0),
    ("and", 0x2227, 0),
    ("or", 0x2228, 0),
    ("cap", 0x2229, 0),
    ("cup", 0x222A, 0),
    ("int", 0x222B, 0),
    ("there4", 0x2234, 0),
    ("sim", 0x223C, 0),
    ("cong", 0x2245, 0),
    ("asymp", 0x2248, 0),
    ("ne", 0x2260, 0),
    ("equiv", 0x2261, 0),
    ("le", 0x2264, 0),
    ("ge", 0x2265, 0),
    ("sub", 0x2282, 0),
    ("sup", 0x2283, 0),
    ("nsub", 0x2284, 0),
    ("sube", 0x2286, 0),
    ("supe", 0x2287, 0),
    ("oplus", 0x2295, 0),
    ("otimes", 0x2297, 0),
    ("perp", 0x22A5, 0),
    ("sdot", 0x22C5, 0),
    // Technical and geometric.
    ("lceil", 0x2308, 0),
    ("rceil", 0x2309, 0),
    ("lfloor", 0x230A, 0),
    ("rfloor", 0x230B, 0),
    ("lang", 0x27E8, 0),
    ("rang", 0x27E9, 0),
    ("loz", 0x25CA, 0),
    ("starf", 0x2605, 0),
    ("star", 0x2606, 0),
    ("phone", 0x260E, 0),
    ("female", 0x2640, 0),
    ("male", 0x2642, 0),
    ("spades", 0x2660, 0),
    ("clubs", 0x2663, 0),
    ("hearts", 0x2665, 0),
    ("diams", 0x2666, 0),
    ("sung", 0x266A, 0),
    ("flat", 0x266D, 0),
    ("natur", 0x266E, 0),
    ("sharp", 0x266F, 0),
    ("check", 0x2713, 0),
    ("cross", 0x2717, 0),
    ("malt", 0x2720, 0),
    // References expanding to two code units.
    ("fjlig", 0x0066, 0x006A),
    ("bne", 0x003D, 0x20E5),
    ("nvlt", 0x003C, 0x20D2),
    ("nvgt", 0x003E, 0x20D2),
    ("NotEqualTilde", 0x2242, 0x0338),
    ("ThickSpace", 0x205F, 0x200A),
    // Supplementary-plane letters (surrogate pairs on decode).
    ("Ascr", 0x1D49C, 0),
    ("ascr", 0x1D4B6, 0),
    ("Afr", 0x1D504, 0),
    ("afr", 0x1D51E, 0),
    ("Aopf", 0x1D538, 0),
    ("aopf", 0x1D552, 0),
];
