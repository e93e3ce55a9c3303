use chrono::{Duration, Utc};
use sitegate_core::{Lang, MemorySiteDirectory, SiteId, SiteKeyRow};

/// Two demo sites:
///
/// - `acme`: path-addressed, primary keys per language plus a retired alias
///   and a renamed key that redirects
/// - `bakery`: served on `bakery.local.test`, published in English and German
pub fn demo_directory() -> MemorySiteDirectory {
    let dir = MemorySiteDirectory::new();
    let launched = Utc::now() - Duration::days(365);

    let acme = SiteId::new("site-acme");
    dir.insert_site(&acme, "acme", true);
    for lang in Lang::ALL {
        dir.insert_instance(&acme, lang);
    }
    dir.insert_key(
        SiteKeyRow::new("acme-hu", &acme, Lang::Hu, "acme-kft")
            .primary()
            .created_at(launched),
    );
    dir.insert_key(SiteKeyRow::new("acme-hu-alias", &acme, Lang::Hu, "acme-hungary"));
    dir.insert_key(
        SiteKeyRow::new("acme-en", &acme, Lang::En, "acme")
            .primary()
            .created_at(launched),
    );
    dir.insert_key(SiteKeyRow::new("acme-en-old", &acme, Lang::En, "acme-ltd").redirect_to("acme-en"));

    let bakery = SiteId::new("site-bakery");
    dir.insert_site(&bakery, "bakery", true);
    dir.insert_domain("bakery.local.test", &bakery, Lang::En, true);
    dir.insert_instance(&bakery, Lang::En);
    dir.insert_instance(&bakery, Lang::De);
    dir.insert_key(SiteKeyRow::new("bakery-en", &bakery, Lang::En, "bakery").primary());

    dir
}
