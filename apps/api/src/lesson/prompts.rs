// Model-facing text for directive format corrections.
// Sent back to the tutor model when a MINI_TEST it produced could not be used.

pub const MINI_TEST_CORRECTION_HEADER: &str =
    "MINI_TEST format hatası tespit edildi. Lütfen aşağıdaki düzeltmeleri yap:";

pub const MISSING_QUESTION_FIX: &str =
    "- SORU METNİ EKSİK: [MINI_TEST: soru_metni, A, B, C, D, doğru_index] formatında soru metni ekle!";

pub const MISSING_OPTIONS_FIX: &str =
    "- SEÇENEKLER EKSİK: MUTLAKA 4 seçenek (A, B, C, D) olmalı! Format: [MINI_TEST: soru, A_şıkkı, B_şıkkı, C_şıkkı, D_şıkkı, doğru_index]";

pub const INVALID_INDEX_FIX: &str =
    "- DOĞRU CEVAP İNDEX'İ EKSİK/GEÇERSİZ: Son parametre olarak 0-3 arası bir sayı ekle! (0=A, 1=B, 2=C, 3=D)";

pub const INVALID_FORMAT_FIX: &str =
    "- FORMAT HATASI: [MINI_TEST: soru, A, B, C, D, doğru_index] formatını kullan!";

pub const MINI_TEST_FORMAT_EXAMPLE: &str = "DOĞRU FORMAT ÖRNEĞİ:\n[MINI_TEST: Python'da liste nasıl tanımlanır?, my_list = [], my_list = {}, my_list = (), my_list = <>, 0]";
