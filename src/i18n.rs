#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    ZhCn,
}

impl Locale {
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().replace('-', "_").as_str() {
            "en" | "en_us" | "en_gb" => Some(Self::En),
            "zh" | "zh_cn" => Some(Self::ZhCn),
            _ => None,
        }
    }
}

fn en(key: &str) -> Option<&'static str> {
    Some(match key {
        "fileUploader" => "Attach files",
        "delete" => "Delete",
        "deleting" => "Deleting…",
        "uploading" => "Uploading…",
        "uploadSucceeded" => "Files uploaded",
        "fileDeleted" => "File deleted",
        "failToDeleteFile" => "Failed to delete file",
        "failToUploadFilesDueToNetwork" => "File upload failed: network error",
        "failToDeleteFileDueToNetwork" => "File delete failed: network error",
        _ => return None,
    })
}

fn zh_cn(key: &str) -> Option<&'static str> {
    Some(match key {
        "fileUploader" => "文件上传",
        "delete" => "删除",
        "deleting" => "正在删除…",
        "uploading" => "正在上传…",
        "uploadSucceeded" => "文件上传成功",
        "fileDeleted" => "文件已删除",
        "failToDeleteFile" => "文件删除失败",
        "failToUploadFilesDueToNetwork" => "文件上传失败：网络原因",
        "failToDeleteFileDueToNetwork" => "文件删除失败：网络原因",
        _ => return None,
    })
}

/// Looks up user-facing strings: active locale, then English, then the key itself.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    locale: Locale,
}

impl Translator {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn t(&self, key: &str) -> String {
        let localized = match self.locale {
            Locale::En => en(key),
            Locale::ZhCn => zh_cn(key),
        };
        localized.or_else(|| en(key)).unwrap_or(key).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_locale_first() {
        let t = Translator::new(Locale::ZhCn);
        assert_eq!(t.t("delete"), "删除");
        assert_eq!(Translator::new(Locale::En).t("delete"), "Delete");
    }

    #[test]
    fn unknown_key_echoes_key() {
        let t = Translator::new(Locale::ZhCn);
        assert_eq!(t.t("noSuchKey"), "noSuchKey");
    }

    #[test]
    fn locale_tags() {
        assert_eq!(Locale::parse("zh-CN"), Some(Locale::ZhCn));
        assert_eq!(Locale::parse("en"), Some(Locale::En));
        assert_eq!(Locale::parse("fr"), None);
    }
}
