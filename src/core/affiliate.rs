/// Default redirect service base URL
pub const DEFAULT_REDIRECT_BASE: &str = "https://redirect.viglink.com";

/// Host that marks a link as already wrapped
pub const DEFAULT_REDIRECT_HOST: &str = "redirect.viglink.com";

/// Default partner key appended to wrapped links
pub const DEFAULT_PARTNER_KEY: &str = "2aba39b05bc3c8c85f46f6f98c7c728d";

/// Rewrites outbound links to go through the tracking redirect service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffiliateLinker {
    redirect_base: String,
    redirect_host: String,
    partner_key: String,
}

impl AffiliateLinker {
    pub fn new(
        redirect_base: impl Into<String>,
        redirect_host: impl Into<String>,
        partner_key: impl Into<String>,
    ) -> Self {
        Self {
            redirect_base: redirect_base.into(),
            redirect_host: redirect_host.into(),
            partner_key: partner_key.into(),
        }
    }

    /// Whether the link already points at the redirect host
    pub fn is_wrapped(&self, url: &str) -> bool {
        url.contains(&self.redirect_host)
    }

    /// Wrap a link as `<base>?key=<key>&u=<encoded url>`
    ///
    /// Links already on the redirect host are returned unchanged. Only
    /// alphanumerics and `-_.~` are left as-is, so `!'()*` are encoded too.
    pub fn wrap(&self, url: &str) -> String {
        if self.is_wrapped(url) {
            return url.to_string();
        }

        format!(
            "{}?key={}&u={}",
            self.redirect_base,
            self.partner_key,
            urlencoding::encode(url)
        )
    }
}

impl Default for AffiliateLinker {
    fn default() -> Self {
        Self::new(DEFAULT_REDIRECT_BASE, DEFAULT_REDIRECT_HOST, DEFAULT_PARTNER_KEY)
    }
}
