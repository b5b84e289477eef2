extern crate argparse;
extern crate tabular_input;
use argparse::{ArgumentParser, StoreOption, StoreTrue};

use tabular_input::{config, Result, RowTemplate, ViewData};

struct Person {
    firstname: &'static str,
    lastname: &'static str,
}

struct PersonRow;
impl RowTemplate<Person> for PersonRow {
    fn render_row(&self, model: &Person, index: usize, _view: &ViewData) -> Result<String> {
        Ok(format!(
            concat!(
                "<div class=\"simple\">",
                "<input name=\"Person[{i}][firstname]\" value=\"{first}\" />",
                "</div>",
                "<div class=\"simple\">",
                "<input name=\"Person[{i}][lastname]\" value=\"{last}\" />",
                "</div>",
            ),
            i = index,
            first = model.firstname,
            last = model.lastname,
        ))
    }
}

struct PersonCells;
impl RowTemplate<Person> for PersonCells {
    fn render_row(&self, model: &Person, index: usize, _view: &ViewData) -> Result<String> {
        Ok(format!(
            concat!(
                "<td><input name=\"Person[{i}][firstname]\" value=\"{first}\" /></td>",
                "<td><input name=\"Person[{i}][lastname]\" value=\"{last}\" /></td>",
            ),
            i = index,
            first = model.firstname,
            last = model.lastname,
        ))
    }
}

fn main() {
    let mut table = false;
    let mut limit: Option<usize> = None;

    {
        let mut ap = ArgumentParser::new();
        ap.refer(&mut table).add_option(
            &["-t", "--table"],
            StoreTrue,
            "Use the table layout preset",
        );
        ap.refer(&mut limit).add_option(
            &["-l", "--limit"],
            StoreOption,
            "Maximum number of rows",
        );
        ap.parse_args_or_exit();
    }

    let people = vec![
        Person {
            firstname: "Ada",
            lastname: "Lovelace",
        },
        Person {
            firstname: "Brendan",
            lastname: "Eich",
        },
    ];

    let mut conf = if table {
        config::table()
            .header("<tr><td>Firstname</td><td>Lastname</td><td></td></tr>")
            .add_template("<tbody><tr><td colspan=\"3\">{link}</td></tr></tbody>")
            .remove_template("<td>{link}</td>")
    } else {
        config::unstyled()
            .add_template("<div class=\"action\">{link}</div>")
            .remove_template("<div class=\"action\">{link}</div>")
    };
    conf = conf.id("people").input_url("/person/row");
    if let Some(limit) = limit {
        conf = conf.input_limit(limit);
    }

    let html = if table {
        conf.render_to_string(&people, &PersonCells)
    } else {
        conf.render_to_string(&people, &PersonRow)
    };

    match html {
        Ok(html) => println!("{}", html),
        Err(e) => eprintln!("render failed: {}", e),
    }
}
