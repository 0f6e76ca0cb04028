use ::page_props::{ComposeContext, ComposeResult, Flattenable, Props};

/// A local module sharing the crate's name must not capture generated paths.
mod page_props {
    pub struct Unrelated;
}

#[derive(::page_props::DataProvider)]
#[data_provider(methods)]
struct Banner {
    pub text: String,
}

#[::page_props::provider_methods]
impl Banner {
    pub fn length(&self) -> usize {
        self.text.len()
    }
}

fn main() {
    let _unrelated = page_props::Unrelated;
    let banner = Banner {
        text: String::from("hello"),
    };
    let result: ComposeResult<Props> = banner.to_flat_map(&ComposeContext::new());
    let _ = result;
}
