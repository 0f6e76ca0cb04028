use page_props::{ComposeContext, ComposeResult, DataProvider, Flattenable, Props, provider_methods};

/// Uses the real crate name as a self-referential alias so no workspace
/// reconfiguration is needed.
#[derive(DataProvider)]
#[data_provider(crate = "page_props", methods)]
struct Banner {
    pub text: String,
}

#[provider_methods(crate = "page_props")]
impl Banner {
    pub fn length(&self) -> usize {
        self.text.len()
    }
}

fn main() {
    let banner = Banner {
        text: String::from("hello"),
    };
    let result: ComposeResult<Props> = banner.to_flat_map(&ComposeContext::new());
    let _ = result;
}
