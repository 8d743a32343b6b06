use anyhow::{Result, bail};
use cabinet::database::Database;
use cabinet::domain::Language;
use cabinet::domain::constants;
use cabinet::domain::content::{
    Announcement, ContentEntity, LegalCategory, ProcessStep, Service, TeamMember, Testimonial,
};
use cabinet::features::content::{Catalog, ContentView, Localize};

pub(crate) async fn run(
    store: &Database,
    collection: &str,
    lang: Language,
    json: bool,
) -> Result<()> {
    let catalog = Catalog::new(store.clone());

    match collection {
        constants::SERVICES => print::<Service>(&catalog, lang, json).await,
        constants::TEAM => print::<TeamMember>(&catalog, lang, json).await,
        constants::PROCESSES | constants::PROCESS_ALIAS => {
            print::<ProcessStep>(&catalog, lang, json).await
        },
        constants::TESTIMONIALS => print::<Testimonial>(&catalog, lang, json).await,
        constants::ANNOUNCEMENTS => print::<Announcement>(&catalog, lang, json).await,
        constants::LEGAL_CATEGORIES => print::<LegalCategory>(&catalog, lang, json).await,
        other => {
            bail!("Unknown collection '{other}', expected one of {:?}", constants::COLLECTIONS)
        },
    }
}

async fn print<T>(catalog: &Catalog<Database>, lang: Language, json: bool) -> Result<()>
where
    T: ContentEntity + Localize,
{
    let views = catalog.localized::<T>(lang).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    println!("{} ({lang}, {} entries)", T::COLLECTION, views.len());
    for view in &views {
        println!("  {:<16} {}", view.id(), view.headline());
    }
    Ok(())
}
