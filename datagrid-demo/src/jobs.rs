//! Sample dataset.

use datagrid::{ColumnDef, Node, Row};
use serde_json::json;

const STAFF: &[(&str, &str, &str, u32, &str, u32)] = &[
    ("Tiger Nixon", "System Architect", "Edinburgh", 61, "2011-04-25", 320_800),
    ("Garrett Winters", "Accountant", "Tokyo", 63, "2011-07-25", 170_750),
    ("Ashton Cox", "Junior Technical Author", "San Francisco", 66, "2009-01-12", 86_000),
    ("Cedric Kelly", "Senior Javascript Developer", "Edinburgh", 22, "2012-03-29", 433_060),
    ("Airi Satou", "Accountant", "Tokyo", 33, "2008-11-28", 162_700),
    ("Brielle Williamson", "Integration Specialist", "New York", 61, "2012-12-02", 372_000),
    ("Herrod Chandler", "Sales Assistant", "San Francisco", 59, "2012-08-06", 137_500),
    ("Rhona Davidson", "Integration Specialist", "Tokyo", 55, "2010-10-14", 327_900),
    ("Colleen Hurst", "Javascript Developer", "San Francisco", 39, "2009-09-15", 205_500),
    ("Sonya Frost", "Software Engineer", "Edinburgh", 23, "2008-12-13", 103_600),
    ("Jena Gaines", "Office Manager", "London", 30, "2008-12-19", 90_560),
    ("Quinn Flynn", "Support Lead", "Edinburgh", 22, "2013-03-03", 342_000),
    ("Charde Marshall", "Regional Director", "San Francisco", 36, "2008-10-16", 470_600),
    ("Haley Kennedy", "Senior Marketing Designer", "London", 43, "2012-12-18", 313_500),
    ("Tatyana Fitzpatrick", "Regional Director", "London", 19, "2010-03-17", 385_750),
    ("Michael Silva", "Marketing Designer", "London", 66, "2012-11-27", 198_500),
    ("Paul Byrd", "Chief Financial Officer (CFO)", "New York", 64, "2010-06-09", 725_000),
    ("Gloria Little", "Systems Administrator", "New York", 59, "2009-04-10", 237_500),
    ("Bradley Greer", "Software Engineer", "London", 41, "2012-10-13", 132_000),
    ("Dai Rios", "Personnel Lead", "Edinburgh", 35, "2012-09-26", 217_500),
    ("Jenette Caldwell", "Development Lead", "New York", 30, "2011-09-03", 345_000),
    ("Yuri Berry", "Chief Marketing Officer (CMO)", "New York", 40, "2009-06-25", 675_000),
    ("Caesar Vance", "Pre-Sales Support", "New York", 21, "2011-12-12", 106_450),
    ("Doris Wilder", "Sales Assistant", "Sydney", 23, "2010-09-20", 85_600),
    ("Angelica Ramos", "Chief Executive Officer (CEO)", "London", 47, "2009-10-09", 1_200_000),
    ("Gavin Joyce", "Developer", "Edinburgh", 42, "2010-12-22", 92_575),
    ("Jennifer Chang", "Regional Director", "Singapore", 28, "2010-11-14", 357_650),
    ("Brenden Wagner", "Software Engineer", "San Francisco", 28, "2011-06-07", 206_850),
    ("Fiona Green", "Chief Operating Officer (COO)", "San Francisco", 48, "2010-03-11", 850_000),
    ("Shou Itou", "Regional Marketing", "Tokyo", 20, "2011-08-14", 163_000),
    ("Michelle House", "Integration Specialist", "Sydney", 37, "2011-06-02", 95_400),
    ("Suki Burks", "Developer", "London", 53, "2009-10-22", 114_500),
    ("Prescott Bartlett", "Technical Author", "London", 27, "2011-05-07", 145_000),
    ("Gavin Cortez", "Team Leader", "San Francisco", 22, "2008-10-26", 235_500),
    ("Martena Mccray", "Post-Sales support", "Edinburgh", 46, "2011-03-09", 324_050),
    ("Unity Butler", "Marketing Designer", "San Francisco", 47, "2009-12-09", 85_675),
];

pub fn rows() -> Vec<Row> {
    STAFF
        .iter()
        .enumerate()
        .map(|(id, (name, position, office, age, start_date, salary))| {
            json!({
                "id": id,
                "name": name,
                "position": position,
                "office": { "city": office },
                "age": age,
                "start_date": start_date,
                "salary": salary,
            })
        })
        .collect()
}

pub fn columns() -> Vec<ColumnDef> {
    vec![
        ColumnDef::new("Name").data("name").named("name"),
        ColumnDef::new("Position").data("position").named("position"),
        ColumnDef::new("Office").data("office.city").named("office"),
        ColumnDef::new("Age").data("age").named("age"),
        ColumnDef::new("Start date")
            .data("start_date")
            .named("start_date")
            .searchable(false),
        ColumnDef::new("Salary")
            .data("salary")
            .named("salary")
            .searchable(false)
            .render(|cx| match cx.raw_value.and_then(|v| v.as_u64()) {
                Some(salary) => Node::text(format!("${}", thousands(salary))),
                None => Node::empty(),
            }),
    ]
}

fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
