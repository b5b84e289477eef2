//! Drives a widget session against a local row-fetch endpoint, the way
//! a browser would drive the real widget against a server route.

extern crate env_logger;
extern crate tabular_input;

use tabular_input::endpoint::RowEndpoint;
use tabular_input::protocol::{FetchError, FetchRequest, Session};
use tabular_input::{config, Result, RowTemplate, ViewData};

#[derive(Default)]
struct Person {
    firstname: String,
    lastname: String,
}

struct PersonRow;
impl RowTemplate<Person> for PersonRow {
    fn render_row(&self, model: &Person, index: usize, _view: &ViewData) -> Result<String> {
        Ok(format!(
            concat!(
                "<input name=\"Person[{i}][firstname]\" value=\"{first}\" />",
                "<input name=\"Person[{i}][lastname]\" value=\"{last}\" />",
            ),
            i = index,
            first = model.firstname,
            last = model.lastname,
        ))
    }
}

fn report<F: tabular_input::RowFetcher>(session: &Session<'_, F>) {
    println!(
        "rows={:?} add-visible={} hide-on-single={} header={}",
        session.indices(),
        session.add_control_visible(),
        session.hide_on_single_visible(),
        session.header_visible()
    );
}

fn main() {
    env_logger::init();

    let endpoint = RowEndpoint::new(PersonRow);
    let conf = config::unstyled()
        .id("people")
        .input_url("/person/row")
        .input_limit(3)
        .remove_confirmation("Remove this person?");

    let fetcher = |request: &FetchRequest| -> std::result::Result<String, FetchError> {
        endpoint
            .handle_raw(&request.query_string())
            .map_err(|e| FetchError::Transport(e.to_string()))
    };

    let mut session = Session::new(&conf, fetcher).confirm_with(|message: &str| {
        println!("confirm [{}] -> yes", message);
        true
    });

    report(&session);
    for _ in 0..3 {
        match session.add() {
            Ok(row) => println!("added row {}:\n  {}", row.index, row.html),
            Err(e) => println!("add failed: {}", e),
        }
        report(&session);
    }
    if let Err(e) = session.add() {
        println!("add failed: {}", e);
    }

    session.remove(1).unwrap();
    report(&session);

    let row = session.add().unwrap();
    println!("added row {} after removal", row.index);
    report(&session);
}
