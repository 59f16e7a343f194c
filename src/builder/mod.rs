mod matrix;
mod qr;

pub use matrix::Module;
pub use qr::QR;

pub(crate) use matrix::ByteMatrix;

use tracing::debug;

use crate::common::{
    codec::{encode_data, CharacterSet},
    error::{QRError, QRResult},
    mask::{compute_total_penalty, MaskPattern},
    metadata::{ECLevel, FormatInfo, Version},
};

pub const DEFAULT_EC_LEVEL: ECLevel = ECLevel::L;
pub const DEFAULT_MARGIN: usize = 4;

// Encode options
//------------------------------------------------------------------------------

/// Options recognised by [`encode`]. Unset fields fall back to the defaults: error correction
/// L, ISO-8859-1, a 4 module margin and the smallest fitting version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    pub error_correction: Option<ECLevel>,
    pub character_set: Option<CharacterSet>,
    pub margin: Option<usize>,
    pub qr_version: Option<usize>,
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error_correction(mut self, ecl: ECLevel) -> Self {
        self.error_correction = Some(ecl);
        self
    }

    pub fn character_set(mut self, charset: CharacterSet) -> Self {
        self.character_set = Some(charset);
        self
    }

    /// Resolves `name` through [`CharacterSet::from_name`].
    pub fn character_set_name(self, name: &str) -> QRResult<Self> {
        Ok(self.character_set(name.parse()?))
    }

    pub fn margin(mut self, margin: usize) -> Self {
        self.margin = Some(margin);
        self
    }

    pub fn qr_version(mut self, version: usize) -> Self {
        self.qr_version = Some(version);
        self
    }
}

/// Encodes `content` into a symbol. Explicit arguments take precedence over `options`, which
/// take precedence over the defaults. A requested version is a minimum: larger versions are
/// searched when the content does not fit it.
pub fn encode(
    content: &str,
    ec_level: Option<ECLevel>,
    character_set: Option<CharacterSet>,
    version: Option<usize>,
    options: &EncodeOptions,
) -> QRResult<QR> {
    let mut builder = QRBuilder::new(content);
    builder.options(*options);
    if let Some(ecl) = ec_level {
        builder.ec_level(ecl);
    }
    if let Some(charset) = character_set {
        builder.character_set(charset);
    }
    if let Some(v) = version {
        builder.version(Version::new(v)?);
    }
    builder.build()
}

// QR builder
//------------------------------------------------------------------------------

pub struct QRBuilder<'a> {
    content: &'a str,
    version: Option<Version>,
    ec_level: Option<ECLevel>,
    charset: Option<CharacterSet>,
    mask: Option<MaskPattern>,
    options: EncodeOptions,
}

impl<'a> QRBuilder<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            version: None,
            ec_level: None,
            charset: None,
            mask: None,
            options: EncodeOptions::default(),
        }
    }

    pub fn content(&mut self, content: &'a str) -> &mut Self {
        self.content = content;
        self
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = Some(ec_level);
        self
    }

    pub fn character_set(&mut self, charset: CharacterSet) -> &mut Self {
        self.charset = Some(charset);
        self
    }

    /// Forces a mask pattern instead of picking the lowest penalty one.
    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn margin(&mut self, margin: usize) -> &mut Self {
        self.options.margin = Some(margin);
        self
    }

    /// Fallback values for anything not set directly on the builder.
    pub fn options(&mut self, options: EncodeOptions) -> &mut Self {
        self.options = options;
        self
    }

    fn resolved_ec_level(&self) -> ECLevel {
        self.ec_level.or(self.options.error_correction).unwrap_or(DEFAULT_EC_LEVEL)
    }

    fn resolved_charset(&self) -> CharacterSet {
        self.charset.or(self.options.character_set).unwrap_or_default()
    }

    fn resolved_version(&self) -> QRResult<Option<Version>> {
        match self.version {
            Some(v) => Ok(Some(v)),
            None => self.options.qr_version.map(Version::new).transpose(),
        }
    }

    pub fn metadata(&self) -> String {
        let version = match self.resolved_version().ok().flatten() {
            Some(v) => v.to_string(),
            None => "None".to_string(),
        };
        format!(
            "{{ Version: {version}, Ec level: {:?}, Charset: {} }}",
            self.resolved_ec_level(),
            self.resolved_charset()
        )
    }
}


impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<QR> {
        let ecl = self.resolved_ec_level();
        let charset = self.charset.or(self.options.character_set);
        let margin = self.options.margin.unwrap_or(DEFAULT_MARGIN);

        debug!("Generating QR {}", self.metadata());
        let encoded = encode_data(self.content, ecl, charset, self.resolved_version()?)?;
        let ver = encoded.version;

        let mut matrix = ByteMatrix::new(ver);
        let mask = match self.mask {
            Some(m) => {
                debug!("Applying forced mask {}", *m);
                m
            }
            None => Self::select_mask(&mut matrix, &encoded.codewords, ecl)?,
        };
        Self::draw_symbol(&mut matrix, &encoded.codewords, ecl, mask)?;

        let qr = QR::new(encoded.mode, ecl, mask, margin, matrix);
        let total_modules = ver.width() * ver.width();
        let dark_modules = qr.count_dark_modules();
        debug!(
            "Generated QR {qr}: data codewords {}, total codewords {}, dark modules {dark_modules}, \
             balance {}%",
            encoded.data.len(),
            encoded.codewords.len(),
            dark_modules * 100 / total_modules
        );
        Ok(qr)
    }

    /// Runs the full placement sequence on a cleared matrix.
    fn draw_symbol(
        matrix: &mut ByteMatrix,
        codewords: &[u8],
        ecl: ECLevel,
        mask: MaskPattern,
    ) -> QRResult<()> {
        matrix.clear();
        matrix.draw_all_function_patterns()?;
        matrix.draw_format_info(FormatInfo::new(ecl, mask))?;
        matrix.draw_version_info()?;
        matrix.draw_payload(codewords, Some(mask))
    }

    /// Draws the symbol under every mask and keeps the lowest penalty, the lowest index on ties.
    fn select_mask(
        matrix: &mut ByteMatrix,
        codewords: &[u8],
        ecl: ECLevel,
    ) -> QRResult<MaskPattern> {
        let mut best: Option<(u32, MaskPattern)> = None;
        for mask in MaskPattern::all() {
            Self::draw_symbol(matrix, codewords, ecl, mask)?;
            let penalty = compute_total_penalty(&matrix.to_bit_matrix());
            debug!("Mask {} penalty {penalty}", *mask);
            if best.map_or(true, |(p, _)| penalty < p) {
                best = Some((penalty, mask));
            }
        }
        let (penalty, mask) = best.ok_or_else(|| QRError::internal("No mask pattern scored"))?;
        debug!("Selected mask {} with penalty {penalty}", *mask);
        Ok(mask)
    }
}
