use dictform::components::{GridView, LegendView};
use dictform::dictionary::{load_dictionaries, parse_yaml, FormElement, Values};
use dictform::panel::DataPanel;
use dictform::records::{JsonRecordProvider, RecordProvider, SaveOutcome};
use dictform::{ExpressionOptions, PageState, WebControlFactory};

const CUSTOMER: &str = r#"
name: Customer
table_name: tb_customer
fields:
  - name: Id
    type: Int
    is_pk: true
    data_behavior: ViewOnly
  - name: Name
    type: Varchar
    size: 60
    is_required: true
  - name: Email
    type: Varchar
    size: 120
    component: Email
    visible_expression: "exp:{pagestate} <> 'FILTER'"
  - name: Status
    type: Varchar
    size: 1
    component: ComboBox
    default_value: "val:A"
    data_item:
      items:
        - id: A
          description: Active
        - id: I
          description: Inactive
  - name: Notes
    type: Text
    component: TextArea
    visible_expression: "exp:{pagestate} = 'VIEW'"
"#;

fn customer() -> FormElement {
    parse_yaml(CUSTOMER).unwrap()
}

fn values(pairs: &[(&str, &str)]) -> Values {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[test]
fn test_insert_panel_applies_defaults() {
    let form = customer();
    let panel = DataPanel::new(&form, PageState::Insert);
    let html = panel.render().unwrap();

    assert!(html.contains(r#"id="pnl_customer""#));
    assert!(html.contains(r#"type="email""#));
    assert!(html.contains(r#"<option value="A" selected="selected">Active</option>"#));
    assert!(html.contains(r#"<span class="required-symbol">*</span>"#));
    // Notes is only visible in view state
    assert!(html.contains(r#"type="hidden""#));
    assert!(!html.contains("<textarea"));
}

#[test]
fn test_filter_panel_drops_hidden_fields() {
    let form = customer();
    let html = DataPanel::new(&form, PageState::Filter).render().unwrap();

    assert!(!html.contains(r#"id="Email""#));
    assert!(!html.contains(r#"id="Notes""#));
    assert!(!html.contains("readonly"));
}

#[test]
fn test_view_panel_disables_controls() {
    let form = customer();
    let mut panel = DataPanel::new(&form, PageState::View);
    panel.values = values(&[("Id", "1"), ("Name", "Ann"), ("Notes", "VIP")]);
    let html = panel.render().unwrap();

    assert!(html.contains("<textarea"));
    assert!(html.contains("VIP"));
    assert!(html.contains(r#"disabled="disabled""#));
    assert!(!html.contains("required-symbol"));
}

#[test]
fn test_validation_errors_are_rendered() {
    let form = customer();
    let mut panel = DataPanel::new(&form, PageState::Insert);

    let posted = values(&[("Name", ""), ("Email", "not-an-email"), ("Status", "A")]);
    let submitted = panel.form_values(&posted).unwrap();
    let errors = panel.validate_fields(&submitted, PageState::Insert).unwrap();

    assert!(errors.contains_key("Name"));
    assert!(errors.contains_key("Email"));
    assert!(!errors.contains_key("Id"));

    panel.values = submitted;
    panel.errors = errors;
    let html = panel.render().unwrap();
    assert!(html.contains("pnl_validation_summary"));
    assert!(html.contains("is-invalid"));
}

#[test]
fn test_factory_marks_view_only_fields_read_only() {
    let form = customer();
    let options = ExpressionOptions::new(&Values::new(), Values::new(), PageState::Update);
    let factory = WebControlFactory::new(&form, options, "pnl_customer");

    let id = factory.create_control(form.field("Id").unwrap(), Some("3")).unwrap();
    assert!(id.base().read_only);

    let name = factory.create_control(form.field("Name").unwrap(), Some("Ann")).unwrap();
    assert!(!name.base().read_only);
    assert!(name.render().unwrap().contains(r#"maxlength="60""#));
}

#[test]
fn test_saved_record_loads_into_panel_and_grid() {
    let dir = tempfile::tempdir().unwrap();
    let provider = JsonRecordProvider::open(dir.path()).unwrap();
    let form = customer();

    let record = values(&[("Id", "1"), ("Name", "Ann"), ("Email", "ann@example.com"), ("Status", "I")]);
    assert_eq!(provider.save(&form, &record).unwrap(), SaveOutcome::Inserted);

    let mut panel = DataPanel::new(&form, PageState::Update);
    assert!(panel.load_values_from_pk(&provider, &values(&[("id", "1")])).unwrap());
    assert_eq!(panel.values["Name"], "Ann");
    assert!(!panel.load_values_from_pk(&provider, &values(&[("Id", "2")])).unwrap());

    let rows = provider.find(&form, &Values::new()).unwrap();
    let html = GridView::new(&form, rows).html_element().unwrap().render();
    assert!(html.contains("Inactive"));
    assert!(html.contains("ann@example.com"));
}

#[test]
fn test_bundled_dictionaries_load() {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("dictionaries");
    let dictionaries = load_dictionaries(&dir).unwrap();

    let customer = dictionaries.iter().find(|d| d.name == "Customer").unwrap();
    assert_eq!(customer.table_name, "tb_customer");

    let legend = LegendView::new(customer).html_element().render();
    assert!(legend.contains("fa fa-check"));
    assert!(legend.contains("Inactive"));
}
