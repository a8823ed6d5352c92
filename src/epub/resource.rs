//! Loaded publication resources, classified by content type.

use crate::errors::WriteError;

macro_rules! content_types {
    {$($variant:ident => [$($media_type:literal),+], $category:ident, $text:literal;)+} => {
        /// Classification of a manifest `media-type`.
        #[non_exhaustive]
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        pub enum ContentType {
            $($variant,)+
            /// Any unrecognized media type.
            Other,
        }

        impl ContentType {
            /// Classifies `media_type`, ignoring case and parameters such as `charset`.
            pub fn from_media_type(media_type: &str) -> Self {
                let media_type = media_type
                    .split(';')
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_ascii_lowercase();

                match media_type.as_str() {
                    $($($media_type)|+ => Self::$variant,)+
                    _ => Self::Other,
                }
            }

            /// The canonical media type, or [`None`] for [`ContentType::Other`].
            pub fn media_type(&self) -> Option<&'static str> {
                match self {
                    $(Self::$variant => Some([$($media_type),+][0]),)+
                    Self::Other => None,
                }
            }

            pub fn category(&self) -> ResourceCategory {
                match self {
                    $(Self::$variant => ResourceCategory::$category,)+
                    Self::Other => ResourceCategory::Other,
                }
            }

            /// Text types are decoded as UTF-8; everything else is kept as raw bytes.
            pub fn is_text(&self) -> bool {
                match self {
                    $(Self::$variant => $text,)+
                    Self::Other => false,
                }
            }
        }
    };
}

content_types! {
    Xhtml => ["application/xhtml+xml", "text/html"], Html, true;
    Dtbook => ["application/x-dtbook+xml"], Other, true;
    DtbookNcx => ["application/x-dtbncx+xml"], Other, true;
    Oeb1Document => ["text/x-oeb1-document"], Other, true;
    Xml => ["application/xml", "text/xml"], Other, true;
    Css => ["text/css"], Css, true;
    Oeb1Css => ["text/x-oeb1-css"], Css, true;
    ImageGif => ["image/gif"], Image, false;
    ImageJpeg => ["image/jpeg", "image/jpg"], Image, false;
    ImagePng => ["image/png"], Image, false;
    ImageSvg => ["image/svg+xml"], Image, false;
    ImageWebp => ["image/webp"], Image, false;
    FontTruetype => ["font/ttf", "font/truetype", "application/x-font-ttf", "application/x-font-truetype"], Font, false;
    FontOpentype => ["font/otf", "font/opentype", "application/vnd.ms-opentype", "application/x-font-opentype"], Font, false;
    FontWoff => ["font/woff", "application/font-woff"], Font, false;
    FontWoff2 => ["font/woff2"], Font, false;
}

/// The bucket a resource is stored in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResourceCategory {
    Html,
    Css,
    Image,
    Font,
    Other,
}

/// Image formats accepted for a cover.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Gif,
    Jpeg,
    Png,
    Svg,
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Gif => "gif",
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }

    pub fn media_type(&self) -> &'static str {
        match self {
            Self::Gif => "image/gif",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Svg => "image/svg+xml",
        }
    }

    pub fn content_type(&self) -> ContentType {
        match self {
            Self::Gif => ContentType::ImageGif,
            Self::Jpeg => ContentType::ImageJpeg,
            Self::Png => ContentType::ImagePng,
            Self::Svg => ContentType::ImageSvg,
        }
    }
}

impl TryFrom<&str> for ImageFormat {
    type Error = WriteError;

    /// Accepts a file extension or a media type, such as `png` or `image/png`.
    fn try_from(format: &str) -> Result<Self, Self::Error> {
        let lower = format.trim().trim_start_matches('.').to_ascii_lowercase();

        match lower.strip_prefix("image/").unwrap_or(&lower) {
            "gif" => Ok(Self::Gif),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            "svg" | "svg+xml" => Ok(Self::Svg),
            _ => Err(WriteError::UnsupportedCoverFormat(format.to_owned())),
        }
    }
}

/// The content of a [`Resource`], decided once by its [`ContentType`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResourceContent {
    Text(String),
    Binary(Vec<u8>),
}

impl ResourceContent {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Binary(bytes) => bytes,
        }
    }

    /// The text of a text resource, or [`None`] for binary content.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Binary(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A loaded publication resource.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resource {
    pub(crate) href: String,
    pub(crate) absolute_path: String,
    pub(crate) media_type: String,
    pub(crate) content_type: ContentType,
    pub(crate) content: ResourceContent,
}

impl Resource {
    pub(crate) fn new(
        href: impl Into<String>,
        absolute_path: impl Into<String>,
        media_type: impl Into<String>,
        content: ResourceContent,
    ) -> Self {
        let media_type = media_type.into();

        Self {
            href: href.into(),
            absolute_path: absolute_path.into(),
            content_type: ContentType::from_media_type(&media_type),
            media_type,
            content,
        }
    }

    /// The manifest href, relative to the package document.
    pub fn href(&self) -> &str {
        &self.href
    }

    /// The location within the archive, starting with `/`.
    pub fn absolute_path(&self) -> &str {
        &self.absolute_path
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn content(&self) -> &ResourceContent {
        &self.content
    }

    pub fn bytes(&self) -> &[u8] {
        self.content.as_bytes()
    }

    pub fn text(&self) -> Option<&str> {
        self.content.as_text()
    }
}

/// Every loaded resource, bucketed by [`ResourceCategory`], each in manifest order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Resources {
    pub(crate) html: Vec<Resource>,
    pub(crate) css: Vec<Resource>,
    pub(crate) images: Vec<Resource>,
    pub(crate) fonts: Vec<Resource>,
    pub(crate) other: Vec<Resource>,
}

impl Resources {
    pub fn html(&self) -> &[Resource] {
        &self.html
    }

    pub fn css(&self) -> &[Resource] {
        &self.css
    }

    pub fn images(&self) -> &[Resource] {
        &self.images
    }

    pub fn fonts(&self) -> &[Resource] {
        &self.fonts
    }

    pub fn other(&self) -> &[Resource] {
        &self.other
    }

    /// All resources: html, css, images, fonts, then others.
    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.html
            .iter()
            .chain(&self.css)
            .chain(&self.images)
            .chain(&self.fonts)
            .chain(&self.other)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Retrieves a resource by its absolute archive path (`/OPS/c1.xhtml`).
    pub fn by_path(&self, absolute_path: &str) -> Option<&Resource> {
        self.iter()
            .find(|resource| resource.absolute_path == absolute_path)
    }

    pub(crate) fn bucket_mut(&mut self, category: ResourceCategory) -> &mut Vec<Resource> {
        match category {
            ResourceCategory::Html => &mut self.html,
            ResourceCategory::Css => &mut self.css,
            ResourceCategory::Image => &mut self.images,
            ResourceCategory::Font => &mut self.fonts,
            ResourceCategory::Other => &mut self.other,
        }
    }

    pub(crate) fn push(&mut self, resource: Resource) {
        self.bucket_mut(resource.content_type.category()).push(resource);
    }

    pub(crate) fn by_path_mut(&mut self, absolute_path: &str) -> Option<&mut Resource> {
        [
            &mut self.html,
            &mut self.css,
            &mut self.images,
            &mut self.fonts,
            &mut self.other,
        ]
        .into_iter()
        .flatten()
        .find(|resource| resource.absolute_path == absolute_path)
    }

    /// Removes every resource located at `absolute_path`.
    pub(crate) fn remove_by_path(&mut self, absolute_path: &str) {
        for bucket in [
            &mut self.html,
            &mut self.css,
            &mut self.images,
            &mut self.fonts,
            &mut self.other,
        ] {
            bucket.retain(|resource| resource.absolute_path != absolute_path);
        }
    }
}

/// Resources outside the manifest buckets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpecialResources {
    pub(crate) ocf: Vec<u8>,
    pub(crate) opf: Vec<u8>,
    pub(crate) reading_order: Vec<String>,
}

impl SpecialResources {
    /// Raw `META-INF/container.xml`, as read.
    pub fn ocf(&self) -> &[u8] {
        &self.ocf
    }

    /// Raw package document, as read.
    pub fn opf(&self) -> &[u8] {
        &self.opf
    }

    /// Absolute paths of the HTML resources referenced by the spine, in spine order.
    pub fn reading_order(&self) -> &[String] {
        &self.reading_order
    }
}
