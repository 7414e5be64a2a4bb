//! Listing page fixtures shaped like the court portal markup.

/// Page markup: four layout tables, the pagination summary as the 5th table
/// and the case table as the 6th.
pub fn listing_page(total: u32, per_page: u32, cases: &[Case]) -> String {
    let layout = "<table><tr><td>menu</td></tr></table>".repeat(4);
    let rows: String = cases.iter().map(Case::to_row).collect();
    format!(
        "<html><head><title>Дела</title></head><body>{layout}\
         <table><tr><td>Найдено:</td><td style=\"font-weight: bold\">\
         Всего по запросу найдено {total}. Показано по {per_page}.</td></tr></table>\
         <table>\
         <tr><th>№ дела</th><th>Дата поступления</th><th>Судья</th><th>Судебные акты</th></tr>\
         {rows}\
         </table></body></html>"
    )
}

/// One case row of the listing.
pub struct Case {
    pub number: String,
    pub received: String,
    pub judge: String,
    pub doc_path: String,
}

impl Case {
    pub fn new(page: u32, index: u32) -> Self {
        Self {
            number: format!("2-{page}{index:02}/2024"),
            received: format!("{index:02}.0{page}.2024"),
            judge: "Иванов И.И.".to_string(),
            doc_path: format!("/modules.php?name=sud_delo&amp;doc={page}{index}"),
        }
    }

    fn to_row(&self) -> String {
        format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td>\
             <td><a href=\"{}\"><img src=\"/img/doc.png\"></a></td></tr>",
            self.number, self.received, self.judge, self.doc_path
        )
    }

    /// Expected CSV line for this case when links resolve against `host`.
    pub fn csv_line(&self, host: &str) -> String {
        format!(
            "{};{};{};{host}{}",
            self.number,
            self.received,
            self.judge,
            self.doc_path.replace("&amp;", "&")
        )
    }
}

/// Two cases per page.
pub fn cases_for(page: u32) -> Vec<Case> {
    vec![Case::new(page, 1), Case::new(page, 2)]
}

/// Encodes ASCII and basic Cyrillic text as windows-1251.
pub fn encode_cp1251(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            c if c.is_ascii() => c as u8,
            'А'..='я' => (0xC0 + (c as u32 - 'А' as u32)) as u8,
            'Ё' => 0xA8,
            'ё' => 0xB8,
            '№' => 0xB9,
            other => panic!("no windows-1251 mapping in fixture for {other:?}"),
        })
        .collect()
}
