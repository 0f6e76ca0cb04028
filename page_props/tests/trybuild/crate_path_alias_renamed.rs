//! Trybuild fixture verifying `crate = "..."` works with a genuine rename
//! via `use ... as`.

use page_props as props_alias;
use props_alias::{ComposeContext, DataProvider, Flattenable, Props, provider_methods};

#[derive(DataProvider)]
#[data_provider(crate = "props_alias", methods, static_data = "extra")]
struct Footer {
    pub year: u16,
    #[data_provider(skip)]
    pub draft: bool,
}

#[provider_methods(crate = "props_alias")]
impl Footer {
    pub fn copyright(&self) -> Result<String, std::fmt::Error> {
        Ok(format!("(c) {}", self.year))
    }

    fn extra(&self) -> Props {
        props_alias::props! { "lang" => "en" }
    }
}

fn main() {
    let footer = Footer {
        year: 2024,
        draft: false,
    };
    let _ = footer.draft;
    let _: props_alias::ComposeResult<Props> = footer.to_flat_map(&ComposeContext::new());
}
